use crate::{Error, Result};

pub type Weight = f64;

pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Explicit conversion of caller input into a face weight.
///
/// Numbers convert directly, text is parsed as a float. The result is
/// checked to be finite and non-negative.
pub trait IntoWeight {
    fn into_raw_weight(self) -> Result<Weight>;

    fn into_weight(self) -> Result<Weight>
    where
        Self: Sized,
    {
        let w = self.into_raw_weight()?;
        if w.is_finite() && w >= 0.0 {
            Ok(w)
        } else {
            Err(Error::InvalidWeight(w))
        }
    }
}

macro_rules! impl_into_weight_from {
    ($($typ:ty),+) => {
        $(
            impl $crate::weight::IntoWeight for $typ {
                fn into_raw_weight(self) -> Result<Weight> {
                    Ok(Weight::from(self))
                }
            }
        )+
    };
}

macro_rules! impl_into_weight_trunc {
    ($($typ:ty),+) => {
        $(
            impl $crate::weight::IntoWeight for $typ {
                fn into_raw_weight(self) -> Result<Weight> {
                    Ok(self as Weight)
                }
            }
        )+
    };
}

impl_into_weight_from!(f64, f32, u8, u16, u32, i8, i16, i32);
impl_into_weight_trunc!(u64, usize, i64, isize);

impl IntoWeight for &str {
    fn into_raw_weight(self) -> Result<Weight> {
        self.trim()
            .parse::<Weight>()
            .map_err(|_| Error::InvalidWeightType(self.to_owned()))
    }
}

impl IntoWeight for String {
    fn into_raw_weight(self) -> Result<Weight> {
        self.as_str().into_raw_weight()
    }
}

impl IntoWeight for &String {
    fn into_raw_weight(self) -> Result<Weight> {
        self.as_str().into_raw_weight()
    }
}
