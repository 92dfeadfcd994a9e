use rand::Rng;
use std::{cell::RefCell, rc::Rc};
use tether::{
    field, focus, from_mailbox, set, signal, transform, Data, Focus, FocusExt, Mailbox, MailboxConfig, Reference,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Data, Focus)]
struct Counter {
    count: i32,
}

#[derive(Clone, Debug, PartialEq, Data, Focus)]
struct Inner {
    x: i32,
    z: String,
}

#[derive(Clone, Debug, PartialEq, Data, Focus)]
struct Outer {
    y: Inner,
    w: Vec<u32>,
}

fn random_outer(rng: &mut impl Rng) -> Outer {
    Outer {
        y: Inner {
            x: rng.gen(),
            z: format!("{}", rng.gen::<u16>()),
        },
        w: (0..rng.gen_range(0..5)).map(|_| rng.gen()).collect(),
    }
}

#[test]
fn set_then_next_emission() {
    init_logging();
    let refs = signal(Counter { count: 0 });
    let mut events = refs.events();
    let root = events.next().unwrap();
    assert_eq!(root.value(), &Counter { count: 0 });

    set(&root).send(Counter { count: 5 });
    assert_eq!(events.next().unwrap().value(), &Counter { count: 5 });
    assert!(events.next().is_none());
}

#[test]
fn transform_then_next_emission() {
    init_logging();
    let refs = signal(Counter { count: 5 });
    let mut events = refs.events();
    let root = events.next().unwrap();

    transform(&root).modify(|m: &Counter| Counter { count: m.count + 1 });
    assert_eq!(events.next().unwrap().value(), &Counter { count: 6 });
}

#[test]
fn field_then_root_receives_whole_value() {
    init_logging();
    let refs = signal(Counter { count: 5 });
    let mut events = refs.events();
    let root = events.next().unwrap();

    let count = field(Counter::count, &root);
    assert_eq!(*count.value(), 5);
    set(&count).send(9);
    assert_eq!(events.next().unwrap().into_value(), Counter { count: 9 });
}

#[test]
fn projection_reads_the_field() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let outer = random_outer(&mut rng);
        let root = signal(outer.clone()).latest();
        assert_eq!(field(Outer::y, &root).value(), &outer.y);
        assert_eq!(*field(Inner::x, &field(Outer::y, &root)).value(), outer.y.x);
        assert_eq!(field(Outer::w, &root).value(), &outer.w);
    }
}

#[test]
fn writes_leave_siblings_untouched() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let outer = random_outer(&mut rng);
        let refs = signal(outer.clone());
        let w: Vec<u32> = vec![rng.gen()];
        set(&field(Outer::w, &refs.latest())).send(w.clone());

        let updated = refs.latest().into_value();
        assert_eq!(updated.w, w);
        assert_eq!(updated.y, outer.y);
    }
}

#[test]
fn nested_writes_reach_the_root() {
    init_logging();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let outer = random_outer(&mut rng);
        let mailbox = Mailbox::with_config(MailboxConfig::new().label("root"), outer.clone());
        let refs = from_mailbox(&mailbox);
        let received = Rc::new(RefCell::new(Vec::new()));
        let _sub = mailbox.stream().subscribe({
            let received = received.clone();
            move |v: &Outer| received.borrow_mut().push(v.clone())
        });

        let v: i32 = rng.gen();
        let x = field(Inner::x, &field(Outer::y, &refs.latest()));
        set(&x).send(v);

        let expected = Outer::y.then(Inner::x).set(v, &outer);
        assert_eq!(*received.borrow(), vec![outer.clone(), expected]);
    }
}

#[test]
fn emissions_follow_sends() {
    let mut rng = rand::thread_rng();
    let mailbox = Mailbox::new(0u64);
    let sink = mailbox.sink();
    let mut events = from_mailbox(&mailbox).events();
    let sent: Vec<u64> = (0..100).map(|_| rng.gen()).collect();
    for &v in &sent {
        sink.send(v);
    }

    // first emission is the value current when we subscribed
    assert_eq!(*events.next().unwrap().value(), 0);
    assert_eq!(events.pending(), sent.len());
    let received: Vec<u64> = events.map(Reference::into_value).collect();
    assert_eq!(received, sent);
}

#[test]
fn queued_transforms_from_a_stale_reference_all_apply() {
    let refs = signal(Counter { count: 0 });
    let stale = refs.latest();
    let count = stale.field(Counter::count);
    for _ in 0..10 {
        transform(&count).modify(|c: &i32| c + 1);
    }
    assert_eq!(refs.latest().value().count, 10);
    // the snapshot itself is unchanged
    assert_eq!(*count.value(), 0);
}

#[test]
fn list_items_edit_through_index_foci() {
    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Todo {
        text: String,
        done: bool,
    }

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Todos {
        items: Vec<Todo>,
    }

    fn render_item(item: &Reference<Todo>) -> Box<dyn Fn()> {
        let done = item.field(Todo::done);
        let toggle = transform(&done);
        Box::new(move || toggle.modify(|d: &bool| !d))
    }

    let refs = signal(Todos {
        items: vec![
            Todo {
                text: "write".into(),
                done: false,
            },
            Todo {
                text: "test".into(),
                done: false,
            },
        ],
    });

    let root = refs.latest();
    let items = root.field(Todos::items);
    let handlers: Vec<_> = (0..items.value().len())
        .map(|i| render_item(&items.map(focus::index(i))))
        .collect();

    handlers[1]();
    handlers[1]();
    handlers[0]();

    let todos = refs.latest().into_value();
    assert!(todos.items[0].done);
    assert!(!todos.items[1].done);
    assert_eq!(todos.items[1].text, "test");
}

#[test]
fn a_component_can_write_while_rendering() {
    init_logging();
    // clamps the counter to 10 whenever it is rendered above
    let refs = signal(Counter { count: 0 });
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let _sub = refs.subscribe({
        let rendered = rendered.clone();
        move |r: &Reference<Counter>| {
            rendered.borrow_mut().push(r.value().count);
            let count = r.field(Counter::count);
            if *count.value() > 10 {
                set(&count).send(10);
            }
        }
    });

    set(&refs.latest()).send(Counter { count: 42 });
    assert_eq!(*rendered.borrow(), vec![0, 42, 10]);
    assert_eq!(refs.latest().value().count, 10);
}

#[test]
fn a_component_can_write_on_its_first_render() {
    init_logging();
    let refs = signal(Counter { count: 42 });
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let _sub = refs.subscribe({
        let rendered = rendered.clone();
        move |r: &Reference<Counter>| {
            rendered.borrow_mut().push(r.value().count);
            let count = r.field(Counter::count);
            if *count.value() > 10 {
                set(&count).send(10);
            }
        }
    });

    assert_eq!(*rendered.borrow(), vec![42, 10]);
    assert_eq!(refs.latest().value().count, 10);

    // buffered events see the correction as well
    let mut events = refs.events();
    assert_eq!(events.next().unwrap().value().count, 10);
    assert!(events.next().is_none());
}
