use std::fmt::{self, Debug, Display};
use std::hash::Hash;

pub type DefaultFace = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Integer,
    Text,
}

/// A value that can be printed on a die face.
///
/// All faces of one die must report the same [`FaceKind`].
pub trait Face: Sized + Debug + Display + Clone + Eq + Hash + Ord {
    fn kind(&self) -> FaceKind;
}

macro_rules! impl_face {
    ($kind:expr; $($typ:ty),+ $(,)?) => {
        $(
            impl $crate::value::Face for $typ {
                fn kind(&self) -> FaceKind {
                    $kind
                }
            }
        )+
    };
}

impl_face!(FaceKind::Integer; u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_face!(FaceKind::Text; char, String, &'static str);

/// Face value whose kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceValue {
    Int(i64),
    Text(String),
}

impl Face for FaceValue {
    fn kind(&self) -> FaceKind {
        match self {
            FaceValue::Int(_) => FaceKind::Integer,
            FaceValue::Text(_) => FaceKind::Text,
        }
    }
}

impl Display for FaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceValue::Int(v) => write!(f, "{v}"),
            FaceValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for FaceValue {
    fn from(value: i64) -> Self {
        FaceValue::Int(value)
    }
}

impl From<i32> for FaceValue {
    fn from(value: i32) -> Self {
        FaceValue::Int(i64::from(value))
    }
}

impl From<&str> for FaceValue {
    fn from(value: &str) -> Self {
        FaceValue::Text(value.to_owned())
    }
}

impl From<String> for FaceValue {
    fn from(value: String) -> Self {
        FaceValue::Text(value)
    }
}
