use std::sync::OnceLock;

use regex::Regex;

/// Entity and numeric character references (`&amp;`, `&#35;`, `&#x22;`).
pub struct Entity;

impl Entity {
    pub const AMP: u8 = b'&';

    fn regex() -> &'static Regex {
        static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
        ENTITY_REGEX.get_or_init(|| {
            Regex::new(r"^&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,31});")
                .expect("Invalid entity regex")
        })
    }

    /// Decodes a reference at the start of `s`.
    ///
    /// Returns the replacement text and the number of bytes consumed, or
    /// `None` when `s` does not start with a valid reference.
    pub fn scan(s: &str) -> Option<(String, usize)> {
        let m = Self::regex().find(s)?;
        let raw = m.as_str();
        let body = &raw[1..raw.len() - 1];
        let decoded = if let Some(num) = body.strip_prefix('#') {
            let value = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            let c = match value {
                0 => '\u{FFFD}',
                v => char::from_u32(v).unwrap_or('\u{FFFD}'),
            };
            c.to_string()
        } else if let Some(pair) = two_code_points(body) {
            pair.to_string()
        } else {
            let decoded = html_escape::decode_html_entities(raw);
            if decoded == raw {
                return None;
            }
            decoded.into_owned()
        };
        Some((decoded, raw.len()))
    }
}

/// Named references whose HTML5 expansion is two code points.
/// `html_escape` only keeps the first of them.
fn two_code_points(name: &str) -> Option<&'static str> {
    let pair = match name {
        "acE" => "\u{223E}\u{0333}",
        "bne" => "\u{003D}\u{20E5}",
        "bnequiv" => "\u{2261}\u{20E5}",
        "caps" => "\u{2229}\u{FE00}",
        "cups" => "\u{222A}\u{FE00}",
        "fjlig" => "\u{0066}\u{006A}",
        "gesl" => "\u{22DB}\u{FE00}",
        "gvertneqq" | "gvnE" => "\u{2269}\u{FE00}",
        "lates" => "\u{2AAD}\u{FE00}",
        "lesg" => "\u{22DA}\u{FE00}",
        "lvertneqq" | "lvnE" => "\u{2268}\u{FE00}",
        "nang" => "\u{2220}\u{20D2}",
        "napE" => "\u{2A70}\u{0338}",
        "napid" => "\u{224B}\u{0338}",
        "nbump" | "NotHumpDownHump" => "\u{224E}\u{0338}",
        "nbumpe" | "NotHumpEqual" => "\u{224F}\u{0338}",
        "ncongdot" => "\u{2A6D}\u{0338}",
        "nedot" => "\u{2250}\u{0338}",
        "nesim" | "NotEqualTilde" => "\u{2242}\u{0338}",
        "ngE" | "ngeqq" | "NotGreaterFullEqual" => "\u{2267}\u{0338}",
        "ngeqslant" | "nges" | "NotGreaterSlantEqual" => "\u{2A7E}\u{0338}",
        "nGg" => "\u{22D9}\u{0338}",
        "nGt" => "\u{226B}\u{20D2}",
        "nGtv" | "NotGreaterGreater" => "\u{226B}\u{0338}",
        "nlE" | "nleqq" => "\u{2266}\u{0338}",
        "nleqslant" | "nles" | "NotLessSlantEqual" => "\u{2A7D}\u{0338}",
        "nLl" => "\u{22D8}\u{0338}",
        "nLt" => "\u{226A}\u{20D2}",
        "nLtv" | "NotLessLess" => "\u{226A}\u{0338}",
        "notindot" => "\u{22F5}\u{0338}",
        "notinE" => "\u{22F9}\u{0338}",
        "NotLeftTriangleBar" => "\u{29CF}\u{0338}",
        "NotNestedGreaterGreater" => "\u{2AA2}\u{0338}",
        "NotNestedLessLess" => "\u{2AA1}\u{0338}",
        "NotPrecedesEqual" | "npre" | "npreceq" => "\u{2AAF}\u{0338}",
        "NotRightTriangleBar" => "\u{29D0}\u{0338}",
        "NotSquareSubset" => "\u{228F}\u{0338}",
        "NotSquareSuperset" => "\u{2290}\u{0338}",
        "NotSubset" | "nsubset" => "\u{2282}\u{20D2}",
        "NotSucceedsEqual" | "nsce" | "nsucceq" => "\u{2AB0}\u{0338}",
        "NotSucceedsTilde" => "\u{227F}\u{0338}",
        "NotSuperset" | "nsupset" => "\u{2283}\u{20D2}",
        "nparsl" => "\u{2AFD}\u{20E5}",
        "npart" => "\u{2202}\u{0338}",
        "nrarrc" => "\u{2933}\u{0338}",
        "nrarrw" => "\u{219D}\u{0338}",
        "nsubE" | "nsubseteqq" => "\u{2AC5}\u{0338}",
        "nsupE" | "nsupseteqq" => "\u{2AC6}\u{0338}",
        "nvap" => "\u{224D}\u{20D2}",
        "nvge" => "\u{2265}\u{20D2}",
        "nvgt" => "\u{003E}\u{20D2}",
        "nvle" => "\u{2264}\u{20D2}",
        "nvlt" => "\u{003C}\u{20D2}",
        "nvltrie" => "\u{22B4}\u{20D2}",
        "nvrtrie" => "\u{22B5}\u{20D2}",
        "nvsim" => "\u{223C}\u{20D2}",
        "race" => "\u{223D}\u{0331}",
        "smtes" => "\u{2AAC}\u{FE00}",
        "sqcaps" => "\u{2293}\u{FE00}",
        "sqcups" => "\u{2294}\u{FE00}",
        "ThickSpace" => "\u{205F}\u{200A}",
        "varsubsetneq" | "vsubne" => "\u{228A}\u{FE00}",
        "varsubsetneqq" | "vsubnE" => "\u{2ACB}\u{FE00}",
        "varsupsetneq" | "vsupne" => "\u{228B}\u{FE00}",
        "varsupsetneqq" | "vsupnE" => "\u{2ACC}\u{FE00}",
        _ => return None,
    };
    Some(pair)
}
