//! Element type and declaration style resolution.
//!
//! A [`Format`] pins down everything about the emitted declaration: the
//! element type of the array (and with it the element width and any
//! `#include` lines the type needs) and the declaration style (the
//! qualifiers prefixing the array and its size constant, and whether a
//! `std::array` wrapper is used instead of a bare bracketed array).
//!
//! Resolution is a pair of pure lookups: [`ElementType::spec`] and
//! [`ArrayStyle::spec`]. Both are total; the defaults (`unsigned char`,
//! `const`) match what the emitted code degrades to most gracefully.

/// Element type of the emitted array, named after the C/C++ type it produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// `unsigned char`, 1 byte per element
    #[default]
    UnsignedChar,
    /// `uint8_t`, 1 byte per element
    Uint8,
    /// `std::byte`, 1 byte per element, tokens wrapped `std::byte{..}`
    StdByte,
    /// `unsigned short`, 2 bytes per element
    UnsignedShort,
    /// `uint16_t`, 2 bytes per element
    Uint16,
    /// `uint32_t`, 4 bytes per element
    Uint32,
    /// `uint64_t`, 8 bytes per element
    Uint64,
}

/// Token metadata for one element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// The C/C++ type token used in the declaration
    pub type_name: &'static str,
    /// Bytes consumed per emitted element
    pub elem_size: usize,
    /// Whether `#include <cstdint>` must precede the declaration
    pub needs_cstdint: bool,
    /// Whether `#include <cstddef>` must precede the declaration
    pub needs_cstddef: bool,
    /// Whether tokens are wrapped in a `std::byte{..}` initializer
    pub uses_std_byte: bool,
}

impl FormatSpec {
    /// Number of hex digits per token, always at least two
    pub fn hex_digits(&self) -> usize {
        (self.elem_size * 2).max(2)
    }

    /// Number of tokens per output line (16 bytes worth, minimum one)
    pub fn values_per_line(&self) -> usize {
        (16 / self.elem_size).max(1)
    }
}

impl ElementType {
    /// Resolves the token metadata for this element type
    pub fn spec(self) -> FormatSpec {
        match self {
            ElementType::UnsignedChar => FormatSpec {
                type_name: "unsigned char",
                elem_size: 1,
                needs_cstdint: false,
                needs_cstddef: true,
                uses_std_byte: false,
            },
            ElementType::Uint8 => FormatSpec {
                type_name: "uint8_t",
                elem_size: 1,
                needs_cstdint: true,
                needs_cstddef: false,
                uses_std_byte: false,
            },
            ElementType::StdByte => FormatSpec {
                type_name: "std::byte",
                elem_size: 1,
                needs_cstdint: false,
                needs_cstddef: true,
                uses_std_byte: true,
            },
            ElementType::UnsignedShort => FormatSpec {
                type_name: "unsigned short",
                elem_size: 2,
                needs_cstdint: false,
                needs_cstddef: true,
                uses_std_byte: false,
            },
            ElementType::Uint16 => FormatSpec {
                type_name: "uint16_t",
                elem_size: 2,
                needs_cstdint: true,
                needs_cstddef: false,
                uses_std_byte: false,
            },
            ElementType::Uint32 => FormatSpec {
                type_name: "uint32_t",
                elem_size: 4,
                needs_cstdint: true,
                needs_cstddef: false,
                uses_std_byte: false,
            },
            ElementType::Uint64 => FormatSpec {
                type_name: "uint64_t",
                elem_size: 8,
                needs_cstdint: true,
                needs_cstddef: false,
                uses_std_byte: false,
            },
        }
    }
}

/// Declaration style of the emitted array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrayStyle {
    /// `const T fileBytes[] = {..};`
    #[default]
    ConstArray,
    /// `static const T fileBytes[] = {..};`
    StaticConstArray,
    /// `constexpr T fileBytes[] = {..};`
    ConstexprArray,
    /// `constexpr std::array<T, N> fileBytes = {..};`
    ConstexprStdArray,
    /// `static constexpr std::array<T, N> fileBytes = {..};`
    StaticConstexprStdArray,
}

/// Qualifier metadata for one declaration style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpec {
    /// Qualifier prefixing the array declaration (trailing space included)
    pub array_qualifier: &'static str,
    /// Qualifier prefixing the size constant(s)
    pub size_qualifier: &'static str,
    /// Whether the array is declared via `std::array<T, N>`
    pub uses_std_array: bool,
}

impl ArrayStyle {
    /// Resolves the qualifier metadata for this style
    pub fn spec(self) -> StyleSpec {
        match self {
            ArrayStyle::ConstArray => StyleSpec {
                array_qualifier: "const ",
                size_qualifier: "const ",
                uses_std_array: false,
            },
            ArrayStyle::StaticConstArray => StyleSpec {
                array_qualifier: "static const ",
                size_qualifier: "static const ",
                uses_std_array: false,
            },
            ArrayStyle::ConstexprArray => StyleSpec {
                array_qualifier: "constexpr ",
                size_qualifier: "constexpr ",
                uses_std_array: false,
            },
            ArrayStyle::ConstexprStdArray => StyleSpec {
                array_qualifier: "constexpr ",
                size_qualifier: "constexpr ",
                uses_std_array: true,
            },
            ArrayStyle::StaticConstexprStdArray => StyleSpec {
                array_qualifier: "static constexpr ",
                size_qualifier: "static constexpr ",
                uses_std_array: true,
            },
        }
    }
}

/// Complete output format for one conversion job
///
/// Immutable once chosen; both paths and the emitted text are fully
/// determined by the format and the input bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format {
    /// Element type of the emitted array
    pub element_type: ElementType,
    /// Declaration style of the emitted array
    pub array_style: ArrayStyle,
}

impl Format {
    /// Creates a format from an element type and a style
    pub fn new(element_type: ElementType, array_style: ArrayStyle) -> Self {
        Self {
            element_type,
            array_style,
        }
    }
}
