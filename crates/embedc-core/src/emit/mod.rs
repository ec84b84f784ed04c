//! Array literal emission.
//!
//! This module turns a byte sequence into the text of a C/C++ array
//! declaration: optional `#include` lines, the declaration header, a
//! line-wrapped stream of fixed-width hexadecimal tokens, and a footer
//! carrying the size constant(s).
//!
//! ## Algorithm overview
//!
//! 1. Bytes are grouped little-endian into elements of the format's width;
//!    a trailing partial element is zero-padded on its high-order bytes.
//! 2. Each element is rendered as `0x` plus a fixed number of uppercase hex
//!    digits (`std::byte` elements are additionally wrapped in a braced
//!    initializer).
//! 3. Sixteen bytes worth of tokens appear per line, each line starting
//!    with a CRLF and a four-space indent.
//! 4. When padding occurred, the footer emits a second size constant
//!    carrying the true input length next to the `sizeof`-derived one.
//!
//! Output is deterministic: the same bytes and format always produce
//! byte-identical text. The [`ArrayWriter`] building blocks are shared by
//! the in-memory and streaming conversion paths; [`encode`] is the one-shot
//! entry point.

use crate::format::{Format, FormatSpec, StyleSpec};

/// Line terminator for all emitted text (the original tool targets MSVC
/// editors, so output is CRLF throughout)
pub const EOL: &str = "\r\n";

/// Indent introducing each line of tokens
const INDENT: &str = "    ";

/// Identifier of the emitted array; the size constants derive their names
/// from it (`fileBytesSize`, `fileBytesOriginalSize`)
pub const ARRAY_NAME: &str = "fileBytes";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Precomputed dimensions of one array emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayLayout {
    /// Bytes per element
    pub elem_size: usize,
    /// Number of emitted elements, `ceil(byte_count / elem_size)`
    pub element_count: usize,
    /// Hex digits per token
    pub hex_digits: usize,
    /// Tokens per output line
    pub values_per_line: usize,
}

impl ArrayLayout {
    /// Computes the layout for `byte_count` input bytes under `spec`
    pub fn new(spec: &FormatSpec, byte_count: usize) -> Self {
        Self {
            elem_size: spec.elem_size,
            element_count: byte_count.div_ceil(spec.elem_size),
            hex_digits: spec.hex_digits(),
            values_per_line: spec.values_per_line(),
        }
    }

    /// Returns true when the final element was zero-padded
    pub fn is_padded(&self, byte_count: usize) -> bool {
        self.element_count * self.elem_size != byte_count
    }
}

/// Assembles element `index` little-endian from `data`, substituting zero
/// for positions beyond the input length
fn element_value(data: &[u8], index: usize, elem_size: usize) -> u64 {
    let base = index * elem_size;
    let mut value = 0u64;
    for b in 0..elem_size {
        let byte = data.get(base + b).copied().unwrap_or(0);
        value |= u64::from(byte) << (8 * b);
    }
    value
}

/// Appends `0x` plus exactly `hex_digits` uppercase hex digits of `value`
fn push_hex(out: &mut String, value: u64, hex_digits: usize) {
    out.push_str("0x");
    for i in 0..hex_digits {
        let shift = (hex_digits - 1 - i) * 4;
        let nibble = ((value >> shift) & 0x0F) as usize;
        out.push(HEX_DIGITS[nibble] as char);
    }
}

/// Emits the declaration text for one byte sequence under one format.
///
/// The writer is stateless across calls; callers drive it element by
/// element, which lets the streaming path flush its accumulation buffer
/// between elements without the writer noticing.
#[derive(Debug, Clone, Copy)]
pub struct ArrayWriter {
    format: FormatSpec,
    style: StyleSpec,
    layout: ArrayLayout,
}

impl ArrayWriter {
    /// Creates a writer for `byte_count` input bytes under `format`
    pub fn new(format: Format, byte_count: usize) -> Self {
        let spec = format.element_type.spec();
        Self {
            format: spec,
            style: format.array_style.spec(),
            layout: ArrayLayout::new(&spec, byte_count),
        }
    }

    /// Returns the precomputed layout
    pub fn layout(&self) -> &ArrayLayout {
        &self.layout
    }

    /// Appends the `#include` lines and the array declaration line up to
    /// and including the opening brace
    pub fn write_preamble(&self, out: &mut String) {
        let mut any_include = false;
        if self.format.needs_cstdint {
            out.push_str("#include <cstdint>");
            out.push_str(EOL);
            any_include = true;
        }
        if self.format.needs_cstddef || self.format.needs_cstdint || self.style.uses_std_array {
            out.push_str("#include <cstddef>");
            out.push_str(EOL);
            any_include = true;
        }
        if self.style.uses_std_array {
            out.push_str("#include <array>");
            out.push_str(EOL);
            any_include = true;
        }
        if any_include {
            out.push_str(EOL);
        }

        out.push_str(self.style.array_qualifier);
        if self.style.uses_std_array {
            out.push_str("std::array<");
            out.push_str(self.format.type_name);
            out.push_str(", ");
            out.push_str(&self.layout.element_count.to_string());
            out.push_str("> ");
            out.push_str(ARRAY_NAME);
            out.push_str(" = {");
        } else {
            out.push_str(self.format.type_name);
            out.push(' ');
            out.push_str(ARRAY_NAME);
            out.push_str("[] = {");
        }
    }

    /// Appends the token for element `index`, including the line break
    /// before the first token of each line and the separator after every
    /// token except the last
    pub fn write_element(&self, out: &mut String, data: &[u8], index: usize) {
        if index % self.layout.values_per_line == 0 {
            out.push_str(EOL);
            out.push_str(INDENT);
        }

        let value = element_value(data, index, self.layout.elem_size);
        if self.format.uses_std_byte {
            out.push_str("std::byte{");
        }
        push_hex(out, value, self.layout.hex_digits);
        if self.format.uses_std_byte {
            out.push('}');
        }

        if index + 1 != self.layout.element_count {
            out.push_str(", ");
        }
    }

    /// Appends the closing brace and the size constant(s).
    ///
    /// When the final element was padded, a second constant carrying the
    /// true input length is emitted so consumers can recover it despite the
    /// `sizeof` value being rounded up.
    pub fn write_footer(&self, out: &mut String, byte_count: usize) {
        out.push_str(EOL);
        out.push_str("};");
        out.push_str(EOL);

        out.push_str(self.style.size_qualifier);
        out.push_str("size_t ");
        out.push_str(ARRAY_NAME);
        out.push_str("Size = sizeof(");
        out.push_str(ARRAY_NAME);
        out.push_str(");");
        out.push_str(EOL);

        if self.layout.is_padded(byte_count) {
            out.push_str(self.style.size_qualifier);
            out.push_str("size_t ");
            out.push_str(ARRAY_NAME);
            out.push_str("OriginalSize = ");
            out.push_str(&byte_count.to_string());
            out.push(';');
            out.push_str(EOL);
        }
    }
}

/// Encodes a complete byte sequence into one declaration string
pub fn encode(data: &[u8], format: Format) -> String {
    let writer = ArrayWriter::new(format, data.len());

    // Five output bytes per input byte is the worst case for 1-byte
    // elements ("0xNN, "), plus headroom for the preamble and footer.
    let mut out = String::with_capacity(data.len() * 5 + 256);

    writer.write_preamble(&mut out);
    for i in 0..writer.layout().element_count {
        writer.write_element(&mut out, data, i);
    }
    writer.write_footer(&mut out, data.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ArrayStyle, ElementType};
    use pretty_assertions::assert_eq;

    fn fmt(element_type: ElementType, array_style: ArrayStyle) -> Format {
        Format::new(element_type, array_style)
    }

    #[test]
    fn test_single_byte() {
        let out = encode(&[0xFF], fmt(ElementType::UnsignedChar, ArrayStyle::ConstArray));
        assert_eq!(
            out,
            "#include <cstddef>\r\n\
             \r\n\
             const unsigned char fileBytes[] = {\r\n\
             \x20   0xFF\r\n\
             };\r\n\
             const size_t fileBytesSize = sizeof(fileBytes);\r\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let out = encode(&[], fmt(ElementType::Uint8, ArrayStyle::ConstArray));
        assert_eq!(
            out,
            "#include <cstdint>\r\n\
             #include <cstddef>\r\n\
             \r\n\
             const uint8_t fileBytes[] = {\r\n\
             };\r\n\
             const size_t fileBytesSize = sizeof(fileBytes);\r\n"
        );
    }

    #[test]
    fn test_empty_input_has_no_original_size_constant() {
        for et in [
            ElementType::UnsignedChar,
            ElementType::Uint16,
            ElementType::Uint32,
            ElementType::Uint64,
        ] {
            let out = encode(&[], fmt(et, ArrayStyle::ConstArray));
            assert!(!out.contains("OriginalSize"), "{et:?}");
        }
    }

    #[test]
    fn test_line_wrap_after_sixteen_tokens() {
        let data: Vec<u8> = (0u8..17).collect();
        let out = encode(&data, fmt(ElementType::UnsignedChar, ArrayStyle::ConstArray));

        // 16 tokens on the first line, the 17th on a fresh indented line.
        // The separator lands before the break, so the line ends "0x0F, ".
        assert!(out.contains("0x0F, \r\n    0x10\r\n"));
        let token_lines = out.lines().filter(|l| l.starts_with("    0x")).count();
        assert_eq!(token_lines, 2);
    }

    #[test]
    fn test_padding_emits_original_size() {
        let out = encode(
            &[1, 2, 3, 4, 5],
            fmt(ElementType::Uint32, ArrayStyle::ConstArray),
        );
        assert!(out.contains("const size_t fileBytesSize = sizeof(fileBytes);\r\n"));
        assert!(out.contains("const size_t fileBytesOriginalSize = 5;\r\n"));
        // Two elements: 04030201 and the zero-padded 00000005.
        assert!(out.contains("0x04030201, 0x00000005"));
    }

    #[test]
    fn test_little_endian_assembly() {
        let out = encode(
            &[0x34, 0x12, 0x78, 0x56],
            fmt(ElementType::Uint16, ArrayStyle::ConstArray),
        );
        assert!(out.contains("0x1234, 0x5678"));
    }

    #[test]
    fn test_std_byte_wraps_tokens() {
        let out = encode(&[0x00, 0xAB], fmt(ElementType::StdByte, ArrayStyle::ConstArray));
        assert!(out.contains("std::byte{0x00}, std::byte{0xAB}"));
        assert!(out.contains("const std::byte fileBytes[] = {"));
    }

    #[test]
    fn test_std_array_header_carries_element_count() {
        let out = encode(
            &[0; 6],
            fmt(ElementType::Uint16, ArrayStyle::StaticConstexprStdArray),
        );
        assert!(out.contains("#include <array>\r\n"));
        assert!(out.contains("#include <cstddef>\r\n"));
        assert!(
            out.contains("static constexpr std::array<uint16_t, 3> fileBytes = {")
        );
        assert!(out.contains("static constexpr size_t fileBytesSize = sizeof(fileBytes);"));
    }

    #[test]
    fn test_uint64_hex_width() {
        let out = encode(
            &[0x01, 0, 0, 0, 0, 0, 0, 0],
            fmt(ElementType::Uint64, ArrayStyle::ConstArray),
        );
        assert!(out.contains("0x0000000000000001"));
    }

    #[test]
    fn test_round_trip_tokens() {
        let data: Vec<u8> = (0u8..=255).cycle().take(1003).collect();
        let elem_size = 4;
        let out = encode(&data, fmt(ElementType::Uint32, ArrayStyle::ConstArray));

        // Recover the bytes by parsing every 0x token back little-endian.
        let mut decoded = Vec::new();
        for line in out.lines().filter(|l| l.starts_with("    0x")) {
            for token in line.trim().trim_end_matches(',').split(", ") {
                let value = u64::from_str_radix(token.trim_start_matches("0x"), 16).unwrap();
                for b in 0..elem_size {
                    decoded.push(((value >> (8 * b)) & 0xFF) as u8);
                }
            }
        }
        decoded.truncate(data.len());
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_crlf_only_line_endings() {
        let out = encode(&[1, 2, 3], fmt(ElementType::UnsignedChar, ArrayStyle::ConstArray));
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0u8..100).collect();
        let format = fmt(ElementType::Uint16, ArrayStyle::ConstexprArray);
        assert_eq!(encode(&data, format), encode(&data, format));
    }
}
