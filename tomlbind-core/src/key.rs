use alloc::boxed::Box;
use alloc::string::{String, ToString};

/// A map key type that can be built from a table key.
///
/// Table keys are always strings; this is how they become `K` in a
/// `HashMap<K, V>`. Newtypes opt in with `#[bind(key)]`.
pub trait BindKey: Sized + 'static {
    /// Name of the key type, for diagnostics.
    const KEY_TYPE: &'static str;

    /// Converts a table key, or explains why it cannot be converted.
    fn from_key(key: &str) -> Result<Self, String>;
}

impl BindKey for String {
    const KEY_TYPE: &'static str = "String";

    fn from_key(key: &str) -> Result<Self, String> {
        Ok(key.to_string())
    }
}

impl BindKey for Box<str> {
    const KEY_TYPE: &'static str = "Box<str>";

    fn from_key(key: &str) -> Result<Self, String> {
        Ok(key.into())
    }
}

impl BindKey for char {
    const KEY_TYPE: &'static str = "char";

    fn from_key(key: &str) -> Result<Self, String> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err("expected exactly one character".to_string()),
        }
    }
}

macro_rules! impl_from_str_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BindKey for $ty {
                const KEY_TYPE: &'static str = stringify!($ty);

                fn from_key(key: &str) -> Result<Self, String> {
                    key.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_from_str_key!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_keys_parse() {
        assert_eq!(u16::from_key("8080"), Ok(8080));
        assert!(u8::from_key("256").is_err());
        assert!(i32::from_key("abc").is_err());
    }

    #[test]
    fn char_keys_need_one_char() {
        assert_eq!(char::from_key("x"), Ok('x'));
        assert!(char::from_key("xy").is_err());
        assert!(char::from_key("").is_err());
    }
}
