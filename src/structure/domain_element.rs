use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::HashMap,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    rc::Rc,
};

/// An ordered sequence of domain elements.
pub type ElementTuple = Vec<DomainElement>;

/// The value carried by a domain element.
#[derive(Clone, Debug)]
pub enum ElementValue {
    /// An integer.
    Int(i64),
    /// A floating point number that is not an integer (see [`ElementFactory::double`]).
    Double(f64),
    /// A string.
    Str(String),
    /// A compound element, made of a function name and an argument tuple.
    Compound(String, ElementTuple),
}

impl ElementValue {
    fn rank(&self) -> u8 {
        match self {
            ElementValue::Int(_) | ElementValue::Double(_) => 0,
            ElementValue::Str(_) => 1,
            ElementValue::Compound(_, _) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        use ElementValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Double(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Double(a), Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Double(a), Double(b)) => a.total_cmp(b),
            (Str(a), Str(b)) => a.cmp(b),
            (Compound(f, args_f), Compound(g, args_g)) => f.cmp(g).then_with(|| args_f.cmp(args_g)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialEq for ElementValue {
    fn eq(&self, other: &Self) -> bool {
        use ElementValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            (Compound(f, args_f), Compound(g, args_g)) => f == g && args_f == args_g,
            _ => false,
        }
    }
}

impl Eq for ElementValue {}

impl Hash for ElementValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            ElementValue::Int(n) => {
                0u8.hash(state);
                n.hash(state)
            }
            ElementValue::Double(x) => {
                1u8.hash(state);
                x.to_bits().hash(state)
            }
            ElementValue::Str(s) => s.hash(state),
            ElementValue::Compound(f, args) => {
                f.hash(state);
                args.hash(state)
            }
        }
    }
}

impl Display for ElementValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementValue::Int(n) => write!(f, "{}", n),
            ElementValue::Double(x) => write!(f, "{}", x),
            ElementValue::Str(s) => write!(f, "\"{}\"", s),
            ElementValue::Compound(name, args) => {
                write!(f, "{}(", name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An interned domain element.
///
/// Domain elements are built by an [`ElementFactory`], which guarantees two elements with the same value share the same identity.
/// Equality and hashing are thus computed on identities, while the ordering follows the values:
/// numbers come first (ordered by their numeric value), then strings, then compound elements.
#[derive(Clone)]
pub struct DomainElement(Rc<ElementValue>);

impl DomainElement {
    /// Returns the value of this element.
    pub fn value(&self) -> &ElementValue {
        &self.0
    }

    /// Returns the integer value of this element, if it is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self.value() {
            ElementValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value of this element, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self.value() {
            ElementValue::Int(n) => Some(*n as f64),
            ElementValue::Double(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns `true` iff this element is a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self.value(), ElementValue::Int(_) | ElementValue::Double(_))
    }

    /// Returns the string value of this element, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self.value() {
            ElementValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for DomainElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DomainElement {}

impl Hash for DomainElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state)
    }
}

impl PartialOrd for DomainElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DomainElement {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            Ordering::Equal
        } else {
            self.0.compare(&other.0)
        }
    }
}

impl Display for DomainElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for DomainElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

/// The interning table of domain elements.
///
/// A single factory should be created for a run and shared (through an [`Rc`]) by all the components that create elements.
/// Elements stay alive as long as the factory does.
///
/// # Example
///
/// ```
/// # use fogrounder::structure::ElementFactory;
/// let factory = ElementFactory::default();
/// assert_eq!(factory.int(3), factory.int(3));
/// assert_eq!(factory.int(3), factory.double(3.0));
/// assert_ne!(factory.int(3), factory.string("3"));
/// ```
#[derive(Default)]
pub struct ElementFactory {
    elements: RefCell<HashMap<ElementValue, DomainElement>>,
}

impl ElementFactory {
    /// Returns the integer element with the given value.
    pub fn int(&self, n: i64) -> DomainElement {
        self.intern(ElementValue::Int(n))
    }

    /// Returns the numeric element with the given value.
    ///
    /// A double holding an integral value that fits into an `i64` is normalized into the corresponding integer element.
    ///
    /// # Panics
    ///
    /// Panics if the value is NaN.
    pub fn double(&self, x: f64) -> DomainElement {
        if x.is_nan() {
            panic!("cannot build a domain element from NaN")
        }
        if x.fract() == 0.0 && (-I64_UPPER_EXCLUSIVE..I64_UPPER_EXCLUSIVE).contains(&x) {
            self.int(x as i64)
        } else {
            self.intern(ElementValue::Double(x))
        }
    }

    /// Returns the string element with the given value.
    pub fn string(&self, s: &str) -> DomainElement {
        self.intern(ElementValue::Str(s.to_string()))
    }

    /// Returns the compound element built from a function name and its arguments.
    pub fn compound(&self, function: &str, args: ElementTuple) -> DomainElement {
        self.intern(ElementValue::Compound(function.to_string(), args))
    }

    /// Returns the number of distinct elements created so far.
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns `true` iff no element has been created yet.
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    fn intern(&self, value: ElementValue) -> DomainElement {
        self.elements
            .borrow_mut()
            .entry(value)
            .or_insert_with_key(|v| DomainElement(Rc::new(v.clone())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let factory = ElementFactory::default();
        let a = factory.string("a");
        let b = factory.string("a");
        assert!(Rc::ptr_eq(&a.0, &b.0));
        assert_eq!(1, factory.len());
        assert_ne!(a, factory.string("b"));
        assert_eq!(2, factory.len());
    }

    #[test]
    fn test_double_normalization() {
        let factory = ElementFactory::default();
        assert_eq!(factory.int(2), factory.double(2.0));
        assert_eq!(factory.int(0), factory.double(-0.0));
        assert_eq!(None, factory.double(2.5).as_int());
        assert_eq!(Some(2.5), factory.double(2.5).as_f64());
        assert_eq!(None, factory.double(1e19).as_int());
    }

    #[test]
    #[should_panic(expected = "cannot build a domain element from NaN")]
    fn test_double_nan() {
        ElementFactory::default().double(f64::NAN);
    } // kcov-ignore

    #[test]
    fn test_compound_interning() {
        let factory = ElementFactory::default();
        let c1 = factory.compound("f", vec![factory.int(1), factory.string("a")]);
        let c2 = factory.compound("f", vec![factory.int(1), factory.string("a")]);
        let c3 = factory.compound("f", vec![factory.int(2), factory.string("a")]);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
        assert_eq!("f(1,\"a\")", format!("{}", c1));
    }

    #[test]
    fn test_order() {
        let factory = ElementFactory::default();
        let mut elements = vec![
            factory.compound("f", vec![factory.int(0)]),
            factory.string("b"),
            factory.double(2.5),
            factory.string("a"),
            factory.int(3),
            factory.int(-1),
        ];
        elements.sort();
        assert_eq!(
            vec![
                factory.int(-1),
                factory.double(2.5),
                factory.int(3),
                factory.string("a"),
                factory.string("b"),
                factory.compound("f", vec![factory.int(0)]),
            ],
            elements
        );
    }

    #[test]
    fn test_accessors() {
        let factory = ElementFactory::default();
        assert!(factory.int(1).is_numeric());
        assert!(!factory.string("1").is_numeric());
        assert_eq!(Some("x"), factory.string("x").as_str());
        assert_eq!(None, factory.int(1).as_str());
    }
}
