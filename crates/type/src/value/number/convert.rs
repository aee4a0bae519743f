// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Lossless conversion between native numeric representations.
///
/// `checked_convert` returns `None` whenever the target cannot hold the
/// source value exactly. Floats narrow to `f32` at native precision, but
/// never overflow a finite value into an infinity.
pub trait SafeConvert<T>: Sized {
	fn checked_convert(self) -> Option<T>;
}

macro_rules! impl_safe_convert_integer {
	($src:ty => $($dst:ty),+) => {
		$(
			impl SafeConvert<$dst> for $src {
				fn checked_convert(self) -> Option<$dst> {
					<$dst>::try_from(self).ok()
				}
			}
		)+
	};
}

macro_rules! impl_safe_convert_integer_to_float {
	($mantissa:expr; $($src:ty),+ => $dst:ty) => {
		$(
			impl SafeConvert<$dst> for $src {
				fn checked_convert(self) -> Option<$dst> {
					let limit: i128 = 1i128 << $mantissa;
					if (self as i128).abs() <= limit {
						Some(self as $dst)
					} else {
						None
					}
				}
			}
		)+
	};
}

impl_safe_convert_integer!(i8 => i8, i16, i32, i64);
impl_safe_convert_integer!(i16 => i8, i16, i32, i64);
impl_safe_convert_integer!(i32 => i8, i16, i32, i64);
impl_safe_convert_integer!(i64 => i8, i16, i32, i64);
impl_safe_convert_integer!(u8 => i8, i16, i32, i64);
impl_safe_convert_integer!(u16 => i8, i16, i32, i64);
impl_safe_convert_integer!(u32 => i8, i16, i32, i64);
impl_safe_convert_integer!(u64 => i8, i16, i32, i64);

impl_safe_convert_integer_to_float!(24; i8, i16, i32, i64, u8, u16, u32, u64 => f32);
impl_safe_convert_integer_to_float!(53; i8, i16, i32, i64, u8, u16, u32, u64 => f64);

impl SafeConvert<f32> for f32 {
	fn checked_convert(self) -> Option<f32> {
		Some(self)
	}
}

impl SafeConvert<f64> for f32 {
	fn checked_convert(self) -> Option<f64> {
		Some(self as f64)
	}
}

impl SafeConvert<f64> for f64 {
	fn checked_convert(self) -> Option<f64> {
		Some(self)
	}
}

impl SafeConvert<f32> for f64 {
	fn checked_convert(self) -> Option<f32> {
		let narrowed = self as f32;
		if self.is_finite() && narrowed.is_infinite() {
			None
		} else {
			Some(narrowed)
		}
	}
}
