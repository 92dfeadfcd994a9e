//! Basic types shared by tether crates: value comparison and foci.

// derives refer to this crate as `::tether_common`, including in our own tests
extern crate self as tether_common;

mod atom;
mod data;
pub mod focus;

pub use crate::{
    atom::Atom,
    data::Data,
    focus::{Focus, FocusExt},
};
pub use tether_common_macros::{Data, Focus};

#[cfg(feature = "imbl")]
pub use imbl;

// Taken from druid
#[cfg(feature = "imbl")]
impl<A: Data> Data for imbl::Vector<A> {
    fn same(&self, other: &Self) -> bool {
        // if a vec is small enough that it doesn't require an allocation
        // it is 'inline'; in this case a pointer comparison is meaningless.
        if self.is_inline() {
            self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.same(b))
        } else {
            self.ptr_eq(other)
        }
    }
}

#[cfg(feature = "imbl")]
impl<K: Clone + 'static, V: Data, S: 'static> Data for imbl::HashMap<K, V, S> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

#[cfg(feature = "imbl")]
impl<A: Data> Data for imbl::OrdSet<A> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{focus, Data, Focus, FocusExt};
    use rand::Rng;

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Color {
        r: u8,
        g: u8,
        b: u8,
    }

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Swatch {
        name: String,
        color: Color,
        #[data(ignore)]
        #[focus(ignore)]
        hits: u32,
    }

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Palette {
        #[focus(name = "all_swatches")]
        swatches: Vec<Swatch>,
    }

    impl Palette {
        // would clash with a field focus named `swatches`
        fn swatches(&self) -> usize {
            self.swatches.len()
        }
    }

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Pair(i32, String);

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Wrapper<T> {
        inner: T,
        version: u64,
    }

    #[derive(Clone, Debug, PartialEq, Data)]
    enum Shape {
        Empty,
        Circle { radius: f64 },
        Rect(f64, f64),
    }

    #[derive(Clone, Debug, PartialEq, Data, Focus)]
    struct Token {
        r#type: u8,
        text: String,
    }

    #[derive(Clone, Debug, PartialEq, Data)]
    enum Keyword {
        Match { r#in: u8 },
        Other,
    }

    fn same_ignoring_case(a: &String, b: &String) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    #[derive(Clone, Debug, PartialEq, Data)]
    struct Tag {
        #[data(same_fn = "same_ignoring_case")]
        name: String,
        weight: u32,
    }

    fn random_color(rng: &mut impl Rng) -> Color {
        Color {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }

    #[test]
    fn derived_foci_obey_lens_laws() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let c = random_color(&mut rng);
            let v: u8 = rng.gen();
            assert_eq!(Color::g.get(&Color::g.set(v, &c)), v);
            assert_eq!(Color::g.set(Color::g.get(&c), &c), c);
            let c2 = Color::g.set(v, &c);
            assert_eq!((c2.r, c2.b), (c.r, c.b));
        }
    }

    #[test]
    fn derived_foci_compose() {
        let mut rng = rand::thread_rng();
        let palette = Palette {
            swatches: (0..4)
                .map(|i| Swatch {
                    name: format!("swatch {i}"),
                    color: random_color(&mut rng),
                    hits: 0,
                })
                .collect(),
        };
        assert_eq!(palette.swatches(), 4);

        let red_of_third = Palette::all_swatches
            .then(focus::index(2))
            .then(Swatch::color)
            .then(Color::r);
        let updated = red_of_third.set(7, &palette);
        assert_eq!(updated.swatches[2].color.r, 7);
        assert_eq!(updated.swatches[2].name, "swatch 2");
        assert_eq!(updated.swatches[1], palette.swatches[1]);
    }

    #[test]
    fn ignored_fields_are_not_compared() {
        let a = Swatch {
            name: "a".into(),
            color: Color { r: 1, g: 2, b: 3 },
            hits: 1,
        };
        let mut b = a.clone();
        b.hits = 2;
        assert!(a.same(&b));
        b.name = "b".into();
        assert!(!a.same(&b));
    }

    #[test]
    fn tuple_struct_foci() {
        let p = Pair(1, "one".into());
        let p = Pair::_0.set(2, &p);
        assert_eq!(p, Pair(2, "one".into()));
        let s: String = Pair::_1.get(&p);
        assert_eq!(s, "one");
    }

    #[test]
    fn generic_struct_foci() {
        let w = Wrapper {
            inner: Color { r: 0, g: 0, b: 0 },
            version: 1,
        };
        let w = Wrapper::<Color>::inner.then(Color::b).set(255, &w);
        assert_eq!(w.inner.b, 255);
        assert_eq!(w.version, 1);
        assert!(w.same(&w.clone()));
    }

    #[test]
    fn enum_data() {
        assert!(Shape::Empty.same(&Shape::Empty));
        assert!(Shape::Circle { radius: 1.0 }.same(&Shape::Circle { radius: 1.0 }));
        assert!(!Shape::Circle { radius: 1.0 }.same(&Shape::Rect(1.0, 1.0)));
        assert!(!Shape::Rect(1.0, 2.0).same(&Shape::Rect(1.0, 3.0)));
    }

    #[test]
    fn raw_identifier_fields() {
        let t = Token {
            r#type: 1,
            text: "fn".into(),
        };
        let t = Token::r#type.set(2, &t);
        assert_eq!(t.r#type, 2);
        assert_eq!(t.text, "fn");
        let ty: u8 = Token::r#type.get(&t);
        assert_eq!(ty, 2);

        let mut u = t.clone();
        assert!(t.same(&u));
        u.r#type = 3;
        assert!(!t.same(&u));

        assert!(Keyword::Match { r#in: 1 }.same(&Keyword::Match { r#in: 1 }));
        assert!(!Keyword::Match { r#in: 1 }.same(&Keyword::Match { r#in: 2 }));
        assert!(Keyword::Other.same(&Keyword::Other));
    }

    #[test]
    fn custom_same_fn() {
        let a = Tag {
            name: "Rust".into(),
            weight: 1,
        };
        let b = Tag {
            name: "rust".into(),
            weight: 1,
        };
        assert!(a.same(&b));
        assert!(!a.same(&Tag { weight: 2, ..b.clone() }));
        assert!(!a.same(&Tag {
            name: "go".into(),
            ..b
        }));
    }
}
