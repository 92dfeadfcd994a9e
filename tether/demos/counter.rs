//! A text-mode counter: components render from references and write back through them.
//!
//! Run with `RUST_LOG=tether=trace` to see deliveries.
use tether::{field, set, signal_with, transform, Data, Focus, MailboxConfig, Reference};
use tracing::info;

#[derive(Clone, Debug, Data, Focus)]
struct Counter {
    count: i32,
    step: i32,
}

#[derive(Clone, Debug, Data, Focus)]
struct App {
    title: String,
    counter: Counter,
}

/// Button handlers produced by a render pass.
struct Buttons {
    increment: Box<dyn Fn() -> anyhow::Result<()>>,
    reset: Box<dyn Fn() -> anyhow::Result<()>>,
}

fn counter_view(counter: &Reference<Counter>) -> Buttons {
    let step = counter.value().step;
    println!("  count: {} (step {})", counter.value().count, step);

    let count = field(Counter::count, counter);
    let increment = transform(&count);
    let reset = set(&count);
    Buttons {
        increment: Box::new(move || -> anyhow::Result<()> {
            increment.try_send(Box::new(move |c: &i32| c + step))?;
            Ok(())
        }),
        reset: Box::new(move || -> anyhow::Result<()> {
            reset.try_send(0)?;
            Ok(())
        }),
    }
}

fn app_view(app: &Reference<App>) -> Buttons {
    println!("[{}]", app.value().title);
    counter_view(&app.field(App::counter))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let refs = signal_with(
        MailboxConfig::new().label("app").skip_unchanged(true),
        App {
            title: "counter".to_string(),
            counter: Counter { count: 0, step: 2 },
        },
    );

    // keep the handlers of the last render, like a UI would
    let buttons = std::rc::Rc::new(std::cell::RefCell::new(None));
    let _render = refs.subscribe({
        let buttons = buttons.clone();
        move |app: &Reference<App>| {
            *buttons.borrow_mut() = Some(app_view(app));
        }
    });

    for _ in 0..3 {
        let b = buttons.borrow_mut().take();
        if let Some(b) = b {
            (b.increment)()?;
        }
    }

    let b = buttons.borrow_mut().take();
    if let Some(b) = b {
        (b.reset)()?;
        // reset again: unchanged, nothing is rendered
        (b.reset)()?;
    }

    info!(count = refs.latest().value().counter.count, "done");
    Ok(())
}
