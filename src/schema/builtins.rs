//! XSD built-in types
//!
//! Maps the built-in datatypes of XML Schema Part 2 onto the closed set of
//! [`PrimitiveType`]s the type graph speaks in. Derived string and integer
//! types collapse onto their nearest primitive; the XSD local name is kept
//! around where it matters (enumerability, literal formatting).
//!
//! See: https://www.w3.org/TR/xmlschema-2/#built-in-datatypes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::namespaces::QName;

// =============================================================================
// XSD Type Names
// =============================================================================

/// String
pub const XSD_STRING: &str = "string";
/// Normalized string
pub const XSD_NORMALIZED_STRING: &str = "normalizedString";
/// Token
pub const XSD_TOKEN: &str = "token";
/// Language
pub const XSD_LANGUAGE: &str = "language";
/// Name
pub const XSD_NAME: &str = "Name";
/// NCName
pub const XSD_NCNAME: &str = "NCName";
/// ID
pub const XSD_ID: &str = "ID";
/// IDREF
pub const XSD_IDREF: &str = "IDREF";
/// IDREFS
pub const XSD_IDREFS: &str = "IDREFS";
/// ENTITY
pub const XSD_ENTITY: &str = "ENTITY";
/// ENTITIES
pub const XSD_ENTITIES: &str = "ENTITIES";
/// NMTOKEN
pub const XSD_NMTOKEN: &str = "NMTOKEN";
/// NMTOKENS
pub const XSD_NMTOKENS: &str = "NMTOKENS";
/// Boolean
pub const XSD_BOOLEAN: &str = "boolean";
/// Decimal
pub const XSD_DECIMAL: &str = "decimal";
/// Integer
pub const XSD_INTEGER: &str = "integer";
/// Long
pub const XSD_LONG: &str = "long";
/// Int
pub const XSD_INT: &str = "int";
/// Short
pub const XSD_SHORT: &str = "short";
/// Byte
pub const XSD_BYTE: &str = "byte";
/// Non-negative integer
pub const XSD_NON_NEGATIVE_INTEGER: &str = "nonNegativeInteger";
/// Positive integer
pub const XSD_POSITIVE_INTEGER: &str = "positiveInteger";
/// Unsigned long
pub const XSD_UNSIGNED_LONG: &str = "unsignedLong";
/// Unsigned int
pub const XSD_UNSIGNED_INT: &str = "unsignedInt";
/// Unsigned short
pub const XSD_UNSIGNED_SHORT: &str = "unsignedShort";
/// Unsigned byte
pub const XSD_UNSIGNED_BYTE: &str = "unsignedByte";
/// Non-positive integer
pub const XSD_NON_POSITIVE_INTEGER: &str = "nonPositiveInteger";
/// Negative integer
pub const XSD_NEGATIVE_INTEGER: &str = "negativeInteger";
/// Float
pub const XSD_FLOAT: &str = "float";
/// Double
pub const XSD_DOUBLE: &str = "double";
/// Duration
pub const XSD_DURATION: &str = "duration";
/// DateTime
pub const XSD_DATETIME: &str = "dateTime";
/// Time
pub const XSD_TIME: &str = "time";
/// Date
pub const XSD_DATE: &str = "date";
/// gYearMonth
pub const XSD_GYEAR_MONTH: &str = "gYearMonth";
/// gYear
pub const XSD_GYEAR: &str = "gYear";
/// gMonthDay
pub const XSD_GMONTH_DAY: &str = "gMonthDay";
/// gDay
pub const XSD_GDAY: &str = "gDay";
/// gMonth
pub const XSD_GMONTH: &str = "gMonth";
/// Hex binary
pub const XSD_HEX_BINARY: &str = "hexBinary";
/// Base64 binary
pub const XSD_BASE64_BINARY: &str = "base64Binary";
/// Any URI
pub const XSD_ANY_URI: &str = "anyURI";
/// QName
pub const XSD_QNAME: &str = "QName";
/// NOTATION
pub const XSD_NOTATION: &str = "NOTATION";
/// anyType
pub const XSD_ANY_TYPE: &str = "anyType";
/// anySimpleType
pub const XSD_ANY_SIMPLE_TYPE: &str = "anySimpleType";
/// anyAtomicType
pub const XSD_ANY_ATOMIC_TYPE: &str = "anyAtomicType";

// =============================================================================
// Primitive Types
// =============================================================================

/// The value types a type graph node or property can bottom out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    /// Character data (string and all string-derived built-ins)
    String,
    /// Boolean
    Boolean,
    /// Arbitrary precision decimal
    Decimal,
    /// Arbitrary precision integer (integer, positiveInteger, ...)
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit signed integer
    Int,
    /// 16-bit signed integer
    Short,
    /// 8-bit signed integer
    Byte,
    /// 64-bit unsigned integer
    UnsignedLong,
    /// 32-bit unsigned integer
    UnsignedInt,
    /// 16-bit unsigned integer
    UnsignedShort,
    /// 8-bit unsigned integer
    UnsignedByte,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Duration
    Duration,
    /// Date and time
    DateTime,
    /// Date
    Date,
    /// Time of day
    Time,
    /// Gregorian calendar fragments (gYear, gMonthDay, ...)
    GregorianDate,
    /// Binary data (hexBinary, base64Binary)
    Binary,
    /// URI
    Uri,
    /// Qualified name
    QName,
    /// Any content (xs:anyType)
    AnyType,
}

impl PrimitiveType {
    /// Map an XSD built-in local name onto its primitive type
    pub fn from_builtin(name: &str) -> Option<Self> {
        let primitive = match name {
            XSD_STRING | XSD_NORMALIZED_STRING | XSD_TOKEN | XSD_LANGUAGE | XSD_NAME
            | XSD_NCNAME | XSD_ID | XSD_IDREF | XSD_IDREFS | XSD_ENTITY | XSD_ENTITIES
            | XSD_NMTOKEN | XSD_NMTOKENS | XSD_NOTATION | XSD_ANY_SIMPLE_TYPE
            | XSD_ANY_ATOMIC_TYPE => PrimitiveType::String,
            XSD_BOOLEAN => PrimitiveType::Boolean,
            XSD_DECIMAL => PrimitiveType::Decimal,
            XSD_INTEGER | XSD_NON_NEGATIVE_INTEGER | XSD_POSITIVE_INTEGER
            | XSD_NON_POSITIVE_INTEGER | XSD_NEGATIVE_INTEGER => PrimitiveType::Integer,
            XSD_LONG => PrimitiveType::Long,
            XSD_INT => PrimitiveType::Int,
            XSD_SHORT => PrimitiveType::Short,
            XSD_BYTE => PrimitiveType::Byte,
            XSD_UNSIGNED_LONG => PrimitiveType::UnsignedLong,
            XSD_UNSIGNED_INT => PrimitiveType::UnsignedInt,
            XSD_UNSIGNED_SHORT => PrimitiveType::UnsignedShort,
            XSD_UNSIGNED_BYTE => PrimitiveType::UnsignedByte,
            XSD_FLOAT => PrimitiveType::Float,
            XSD_DOUBLE => PrimitiveType::Double,
            XSD_DURATION => PrimitiveType::Duration,
            XSD_DATETIME => PrimitiveType::DateTime,
            XSD_DATE => PrimitiveType::Date,
            XSD_TIME => PrimitiveType::Time,
            XSD_GYEAR_MONTH | XSD_GYEAR | XSD_GMONTH_DAY | XSD_GDAY | XSD_GMONTH => {
                PrimitiveType::GregorianDate
            }
            XSD_HEX_BINARY | XSD_BASE64_BINARY => PrimitiveType::Binary,
            XSD_ANY_URI => PrimitiveType::Uri,
            XSD_QNAME => PrimitiveType::QName,
            XSD_ANY_TYPE => PrimitiveType::AnyType,
            _ => return None,
        };
        Some(primitive)
    }

    /// Check if this type is a numeric type
    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Check if this type is an integral type
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Integer
                | PrimitiveType::Long
                | PrimitiveType::Int
                | PrimitiveType::Short
                | PrimitiveType::Byte
                | PrimitiveType::UnsignedLong
                | PrimitiveType::UnsignedInt
                | PrimitiveType::UnsignedShort
                | PrimitiveType::UnsignedByte
        )
    }

    /// Whether an enumeration over this type names symbols
    ///
    /// The primitive counterpart of [`is_enumerable_builtin`].
    pub fn is_enumerable(&self) -> bool {
        matches!(
            self,
            PrimitiveType::String | PrimitiveType::Uri | PrimitiveType::QName
        )
    }

    /// Check if this type is a date/time type
    pub fn is_datetime(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Duration
                | PrimitiveType::DateTime
                | PrimitiveType::Date
                | PrimitiveType::Time
                | PrimitiveType::GregorianDate
        )
    }

    /// Width rank among numeric types; a higher rank holds every lower one
    fn numeric_rank(&self) -> Option<u8> {
        let rank = match self {
            PrimitiveType::Byte => 1,
            PrimitiveType::UnsignedByte => 2,
            PrimitiveType::Short => 3,
            PrimitiveType::UnsignedShort => 4,
            PrimitiveType::Int => 5,
            PrimitiveType::UnsignedInt => 6,
            PrimitiveType::Long => 7,
            PrimitiveType::UnsignedLong => 8,
            PrimitiveType::Integer => 9,
            PrimitiveType::Decimal => 10,
            PrimitiveType::Float => 11,
            PrimitiveType::Double => 12,
            _ => return None,
        };
        Some(rank)
    }

    /// The widest type able to hold values of every type in `types`
    ///
    /// Numeric types widen to the highest ranked member; any other mix
    /// (or an empty input) falls back to [`PrimitiveType::String`].
    pub fn widest_common(types: &[PrimitiveType]) -> PrimitiveType {
        if types.is_empty() {
            return PrimitiveType::String;
        }
        if types.windows(2).all(|w| w[0] == w[1]) {
            return types[0];
        }
        let mut widest: Option<(u8, PrimitiveType)> = None;
        for ty in types {
            match ty.numeric_rank() {
                Some(rank) => {
                    if widest.map_or(true, |(r, _)| rank > r) {
                        widest = Some((rank, *ty));
                    }
                }
                None => return PrimitiveType::String,
            }
        }
        widest.map_or(PrimitiveType::String, |(_, ty)| ty)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Long => "long",
            PrimitiveType::Int => "int",
            PrimitiveType::Short => "short",
            PrimitiveType::Byte => "byte",
            PrimitiveType::UnsignedLong => "unsignedLong",
            PrimitiveType::UnsignedInt => "unsignedInt",
            PrimitiveType::UnsignedShort => "unsignedShort",
            PrimitiveType::UnsignedByte => "unsignedByte",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Duration => "duration",
            PrimitiveType::DateTime => "dateTime",
            PrimitiveType::Date => "date",
            PrimitiveType::Time => "time",
            PrimitiveType::GregorianDate => "gregorianDate",
            PrimitiveType::Binary => "binary",
            PrimitiveType::Uri => "uri",
            PrimitiveType::QName => "qname",
            PrimitiveType::AnyType => "anyType",
        };
        f.write_str(name)
    }
}

/// Whether `qname` names a built-in XSD type
pub fn is_builtin(qname: &QName) -> bool {
    qname.is_xsd() && PrimitiveType::from_builtin(&qname.local_name).is_some()
}

/// Whether the built-in can carry an enumeration that becomes an enum model
///
/// These are the string-valued built-ins: an enumeration over them names
/// symbols rather than constraining a numeric or temporal range.
pub fn is_enumerable_builtin(name: &str) -> bool {
    matches!(
        name,
        XSD_STRING
            | XSD_NORMALIZED_STRING
            | XSD_TOKEN
            | XSD_LANGUAGE
            | XSD_NAME
            | XSD_NCNAME
            | XSD_ID
            | XSD_IDREF
            | XSD_ENTITY
            | XSD_NMTOKEN
            | XSD_ANY_URI
            | XSD_QNAME
    )
}

/// Whether the built-in is itself a list type (IDREFS, ENTITIES, NMTOKENS)
pub fn is_list_builtin(name: &str) -> bool {
    matches!(name, XSD_IDREFS | XSD_ENTITIES | XSD_NMTOKENS)
}

// =============================================================================
// Tests
// =============================================================================
