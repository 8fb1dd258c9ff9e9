//! Call Descriptor Module
//!
//! Identifies one invocation of a wrapped callable and derives the
//! deterministic signature the cache uses as its lookup key.
//!
//! Equality between calls is purely structural: two descriptors whose
//! arguments render to the same fragments share one signature, and that
//! is the only notion of "same call" the cache recognizes. There is no
//! user-supplied equality or hash hook.

use std::fmt;

// == Signature Argument ==
/// Signature contribution of a single argument value.
///
/// Every argument type must state how it renders into the call signature:
/// implementations are provided for plain data (primitives, strings,
/// options, vectors); opaque handle-like types must implement it
/// explicitly. Two distinct values with equal renderings collide by
/// design, e.g. `"1"` and `1` both render as `1`. A rendering that does
/// not reflect a value's internal state will alias logically different
/// calls; that is a documented limitation of structural keying, not a
/// cache defect.
pub trait SignatureArg {
    /// Renders this value as a signature fragment.
    fn render(&self) -> String;
}

macro_rules! impl_signature_arg_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SignatureArg for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_signature_arg_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl SignatureArg for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl SignatureArg for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: SignatureArg> SignatureArg for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => "None".to_string(),
        }
    }
}

impl<T: SignatureArg> SignatureArg for Vec<T> {
    fn render(&self) -> String {
        let items: Vec<String> = self.iter().map(SignatureArg::render).collect();
        format!("[{}]", items.join(","))
    }
}

impl<T: SignatureArg + ?Sized> SignatureArg for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

// == Call Arguments ==
/// A full argument bundle for one invocation.
///
/// Tuples of [`SignatureArg`] values (up to arity 4) contribute their
/// elements positionally. Custom argument structs implement this trait
/// explicitly and may additionally contribute named fragments; named
/// fragments must be returned in a stable order (declaration order is
/// the convention) so signatures stay deterministic.
pub trait CallArgs {
    /// Positional fragments, in call order.
    fn positional(&self) -> Vec<String>;

    /// Named fragments as `(name, value)` pairs, in stable order.
    fn named(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl CallArgs for () {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! impl_call_args_tuple {
    ($(($($name:ident : $idx:tt),+))+) => {
        $(
            impl<$($name: SignatureArg),+> CallArgs for ($($name,)+) {
                fn positional(&self) -> Vec<String> {
                    vec![$(self.$idx.render()),+]
                }
            }
        )+
    };
}

impl_call_args_tuple! {
    (A0: 0)
    (A0: 0, A1: 1)
    (A0: 0, A1: 1, A2: 2)
    (A0: 0, A1: 1, A2: 2, A3: 3)
}

// == Signature ==
/// Deterministic lookup key derived from a call descriptor.
///
/// Rendered as `name(pos1,pos2,key1=val1)`: positional fragments in call
/// order, then named fragments in their stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    /// Returns the signature text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Call Descriptor ==
/// Identity of one invocation: callable name plus its argument bundle.
///
/// Immutable once constructed; the cache entry that results from the
/// call takes ownership of it.
#[derive(Debug, Clone)]
pub struct CallDescriptor<A: CallArgs> {
    name: String,
    args: A,
}

impl<A: CallArgs> CallDescriptor<A> {
    // == Constructor ==
    /// Creates a descriptor for `name` invoked with `args`.
    pub fn new(name: impl Into<String>, args: A) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Returns the callable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the typed argument bundle.
    pub fn args(&self) -> &A {
        &self.args
    }

    // == Signature Derivation ==
    /// Derives the lookup key for this call.
    ///
    /// Structurally-equal argument bundles always yield identical
    /// signatures.
    pub fn signature(&self) -> Signature {
        let mut fragments = self.args.positional();
        fragments.extend(
            self.args
                .named()
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, value)),
        );
        Signature(format!("{}({})", self.name, fragments.join(",")))
    }
}

impl<A: CallArgs> fmt::Display for CallDescriptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}
