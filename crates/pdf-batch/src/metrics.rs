//! Text measurement for the standard Times-Roman face.
//!
//! Widths are glyph advances in 1/1000 em taken from the Adobe Core 14 AFM
//! metrics. Coverage is the WinAnsi repertoire that the builtin PDF fonts can
//! encode: printable ASCII, Latin-1 and the WinAnsi additions in 0x80..=0x9F.
//! The same encoding is used when the renderer writes text strings, so the
//! measured width is the drawn width.

use crate::types::{BatchError, Result};

/// Measures the rendered width of a string at a given font size.
pub trait TextMeasurer: Send + Sync {
    fn width_of(&self, text: &str, font_size: f32) -> Result<f32>;
}

/// Times-Roman advance widths for 0x20..=0x7E. Index = (char as usize) - 0x20.
const ASCII_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, // space ! " # $ % & '
    333, 333, 500, 564, 250, 333, 250, 278, // ( ) * + , - . /
    500, 500, 500, 500, 500, 500, 500, 500, // 0-7
    500, 500, 278, 278, 564, 564, 564, 444, // 8 9 : ; < = > ?
    921, 722, 667, 667, 722, 611, 556, 722, // @ A-G
    722, 333, 389, 722, 611, 889, 722, 722, // H-O
    556, 722, 667, 556, 611, 722, 722, 944, // P-W
    722, 722, 611, 333, 278, 333, 469, 500, // X Y Z [ \ ] ^ _
    333, 444, 500, 444, 500, 444, 333, 500, // ` a-g
    500, 278, 278, 500, 278, 778, 500, 500, // h-o
    500, 500, 333, 389, 278, 500, 500, 722, // p-w
    500, 500, 444, 480, 200, 480, 541, // x y z { | } ~
];

/// Times-Roman advance widths for 0xA0..=0xFF. Index = (char as usize) - 0xA0.
const LATIN1_WIDTHS: [u16; 96] = [
    250, 333, 500, 500, 500, 500, 200, 500, // nbsp ¡ ¢ £ ¤ ¥ ¦ §
    333, 760, 276, 500, 564, 333, 760, 333, // ¨ © ª « ¬ shy ® ¯
    400, 564, 300, 300, 333, 500, 453, 250, // ° ± ² ³ ´ µ ¶ ·
    333, 300, 310, 500, 750, 750, 750, 444, // ¸ ¹ º » ¼ ½ ¾ ¿
    722, 722, 722, 722, 722, 722, 889, 667, // À-Å Æ Ç
    611, 611, 611, 611, 333, 333, 333, 333, // È-Ë Ì-Ï
    722, 722, 722, 722, 722, 722, 722, 564, // Ð Ñ Ò-Ö ×
    722, 722, 722, 722, 722, 722, 556, 500, // Ø Ù-Ü Ý Þ ß
    444, 444, 444, 444, 444, 444, 667, 444, // à-å æ ç
    444, 444, 444, 444, 278, 278, 278, 278, // è-ë ì-ï
    500, 500, 500, 500, 500, 500, 500, 564, // ð ñ ò-ö ÷
    500, 500, 500, 500, 500, 500, 500, 500, // ø ù-ü ý þ ÿ
];

/// Times-Roman advance widths for 0x80..=0x9F. Index = code - 0x80; zero
/// marks codes WinAnsi leaves undefined.
const WIN_ANSI_EXTRA_WIDTHS: [u16; 32] = [
    500, 0, 333, 500, 444, 1000, 500, 500, // € · ‚ ƒ „ … † ‡
    333, 1000, 556, 333, 889, 0, 611, 0, // ˆ ‰ Š ‹ Œ · Ž ·
    0, 333, 333, 444, 444, 350, 500, 1000, // · ‘ ’ “ ” • – —
    333, 980, 389, 333, 722, 0, 444, 722, // ˜ ™ š › œ · ž Ÿ
];

/// WinAnsiEncoding code for `ch`, if the encoding has one.
pub fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch as u32 {
        c @ (0x20..=0x7E | 0xA0..=0xFF) => c as u8,
        _ => match ch {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => return None,
        },
    };
    Some(code)
}

/// Encode `text` as WinAnsi bytes for a builtin-font text string.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| {
            win_ansi_code(ch).ok_or(BatchError::Measure {
                ch,
                font: TimesRoman::NAME,
            })
        })
        .collect()
}

fn times_roman_advance(code: u8) -> u16 {
    match code {
        0x20..=0x7E => ASCII_WIDTHS[(code - 0x20) as usize],
        0x80..=0x9F => WIN_ANSI_EXTRA_WIDTHS[(code - 0x80) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(code - 0xA0) as usize],
        _ => 0,
    }
}

/// Metrics for the builtin Times-Roman font.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimesRoman;

impl TimesRoman {
    pub const NAME: &'static str = "Times-Roman";
}

impl TextMeasurer for TimesRoman {
    fn width_of(&self, text: &str, font_size: f32) -> Result<f32> {
        let units: u32 = encode_win_ansi(text)?
            .into_iter()
            .map(|code| u32::from(times_roman_advance(code)))
            .sum();
        Ok(units as f32 / 1000.0 * font_size)
    }
}
