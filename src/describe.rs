//! Value rendering for check diagnostics.
//!
//! Integers render as `<decimal> (0x<hex>)` where the hex field is padded to
//! the smallest of 8/16/32/64 bits that holds the value, with the character
//! appended when the value is printable ASCII: `65 (0x41,'A')`,
//! `-1 (0xff)`, `300 (0x012c)`. Pointers render as their address padded to
//! the platform pointer width: `[0x00007ffd5e3c1a2c]`.
//!
//! Rendering goes straight into a `fmt::Write`; nothing is allocated.

use std::fmt;

/// A value that can describe itself in check diagnostics.
pub trait Describe {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result;
}

const PRINTABLE: std::ops::Range<i64> = 0x20..0x7f;

pub fn describe_signed<W: fmt::Write + ?Sized>(out: &mut W, v: i64) -> fmt::Result {
    if PRINTABLE.contains(&v) {
        write!(out, "{} (0x{:02x},'{}')", v, v as u8, v as u8 as char)
    } else if i64::from(i8::MIN) <= v && v <= i64::from(i8::MAX) {
        write!(out, "{} (0x{:02x})", v, v as u8)
    } else if i64::from(i16::MIN) <= v && v <= i64::from(i16::MAX) {
        write!(out, "{} (0x{:04x})", v, v as u16)
    } else if i64::from(i32::MIN) <= v && v <= i64::from(i32::MAX) {
        write!(out, "{} (0x{:08x})", v, v as u32)
    } else {
        write!(out, "{} (0x{:016x})", v, v as u64)
    }
}

pub fn describe_unsigned<W: fmt::Write + ?Sized>(out: &mut W, v: u64) -> fmt::Result {
    if (0x20..0x7f).contains(&v) {
        write!(out, "{} (0x{:02x},'{}')", v, v, v as u8 as char)
    } else if v <= u64::from(u8::MAX) {
        write!(out, "{} (0x{:02x})", v, v)
    } else if v <= u64::from(u16::MAX) {
        write!(out, "{} (0x{:04x})", v, v)
    } else if v <= u64::from(u32::MAX) {
        write!(out, "{} (0x{:08x})", v, v)
    } else {
        write!(out, "{} (0x{:016x})", v, v)
    }
}

pub fn describe_ptr<W: fmt::Write + ?Sized>(out: &mut W, addr: usize) -> fmt::Result {
    let width = 2 * std::mem::size_of::<usize>();
    write!(out, "[0x{:0width$x}]", addr, width = width)
}

macro_rules! describe_via {
    ($helper:ident as $wide:ty => $($t:ty),*) => {
        $(
            impl Describe for $t {
                fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
                    $helper(out, *self as $wide)
                }
            }
        )*
    };
}

describe_via!(describe_signed as i64 => i8, i16, i32, i64, isize);
describe_via!(describe_unsigned as u64 => u8, u16, u32, u64, usize);

impl Describe for bool {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(if *self { "true" } else { "false" })
    }
}

impl Describe for char {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, "'{}' (U+{:04X})", self.escape_default(), u32::from(*self))
    }
}

impl<T: ?Sized> Describe for *const T {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        describe_ptr(out, self.cast::<()>() as usize)
    }
}

impl<T: ?Sized> Describe for *mut T {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        describe_ptr(out, self.cast::<()>() as usize)
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        (**self).describe(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Describe>(value: T) -> String {
        let mut s = String::new();
        value.describe(&mut s).unwrap();
        s
    }

    #[test]
    fn printable_values_show_the_character() {
        assert_eq!(render(65i32), "65 (0x41,'A')");
        assert_eq!(render(b'{'), "123 (0x7b,'{')");
        assert_eq!(render(0x20u64), "32 (0x20,' ')");
    }

    #[test]
    fn hex_width_follows_value_range() {
        assert_eq!(render(-1i32), "-1 (0xff)");
        assert_eq!(render(0x7fi8), "127 (0x7f)");
        assert_eq!(render(-129i32), "-129 (0xff7f)");
        assert_eq!(render(300u32), "300 (0x012c)");
        assert_eq!(render(-40000i64), "-40000 (0xffff63c0)");
        assert_eq!(render(70000u32), "70000 (0x00011170)");
        assert_eq!(render(1i64 << 40), "1099511627776 (0x0000010000000000)");
        assert_eq!(render(u64::MAX), "18446744073709551615 (0xffffffffffffffff)");
    }

    #[test]
    fn rendering_is_idempotent() {
        for v in [-70000i64, -1, 0, 65, 255, 1 << 33] {
            assert_eq!(render(v), render(v));
        }
    }

    #[test]
    fn pointers_pad_to_pointer_width() {
        let p = 0x1234usize as *const u8;
        let expected = format!("[0x{:0w$x}]", 0x1234, w = 2 * std::mem::size_of::<usize>());
        assert_eq!(render(p), expected);
        assert!(render(std::ptr::null::<u32>()).starts_with("[0x0000"));
    }

    #[test]
    fn bools_and_chars() {
        assert_eq!(render(true), "true");
        assert_eq!(render('A'), "'A' (U+0041)");
        assert_eq!(render(&42u16), "42 (0x2a,'*')");
    }
}
