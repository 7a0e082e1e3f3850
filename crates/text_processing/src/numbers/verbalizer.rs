//! Numeral verbalization
//!
//! Converts integers (and the textual form of decimals) to words for speech
//! synthesis. One implementation per locale.

use voice_ci_core::Locale;

/// Locale-specific number-to-words conversion
pub trait NumberVerbalizer: Send + Sync {
    /// Words for a non-negative integer
    fn verbalize(&self, n: u64) -> String;

    /// Word prefixed to negative numbers
    fn minus_word(&self) -> &'static str;

    /// Word joining integer and fractional parts
    fn point_word(&self) -> &'static str;

    fn verbalize_signed(&self, n: i64) -> String {
        if n < 0 {
            format!("{} {}", self.minus_word(), self.verbalize(n.unsigned_abs()))
        } else {
            self.verbalize(n as u64)
        }
    }

    /// Words for a string of ASCII digits
    ///
    /// Leading zeros are ignored. Values too large for `u64` are read out
    /// digit by digit.
    fn verbalize_digits(&self, digits: &str) -> String {
        match digits.parse::<u64>() {
            Ok(n) => self.verbalize(n),
            Err(_) => digits
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| self.verbalize(u64::from(d)))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Words for a decimal given in textual form, e.g. `"3.14"`
    ///
    /// Both sides of the `.` are read as integers, so `"3.14"` becomes
    /// "three point fourteen", not "three point one four". Text without a
    /// `.` reads as a fractional part of zero. Returns `None` when the text
    /// is not a plain decimal.
    fn verbalize_decimal(&self, text: &str) -> Option<String> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
        if !is_digits(int_part) || !is_digits(frac_part) {
            return None;
        }

        let mut words = format!(
            "{} {} {}",
            self.verbalize_digits(int_part),
            self.point_word(),
            self.verbalize_digits(frac_part)
        );
        if negative {
            words = format!("{} {}", self.minus_word(), words);
        }
        Some(words)
    }

    /// Words for a float, split at the `.` of its textual form
    fn verbalize_float(&self, value: f64) -> String {
        let text = value.to_string();
        self.verbalize_decimal(&text).unwrap_or(text)
    }
}

pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

static RUSSIAN: RussianVerbalizer = RussianVerbalizer;
static ENGLISH: EnglishVerbalizer = EnglishVerbalizer;

/// Shared verbalizer for a locale
pub fn verbalizer_for(locale: Locale) -> &'static dyn NumberVerbalizer {
    match locale {
        Locale::Russian => &RUSSIAN,
        Locale::English => &ENGLISH,
    }
}

// ============================================================================
// Russian
// ============================================================================

const RU_ONES: [&str; 10] = [
    "ноль", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];
const RU_ONES_FEMININE: [&str; 3] = ["ноль", "одна", "две"];
const RU_TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];
const RU_TENS: [&str; 10] = [
    "",
    "",
    "двадцать",
    "тридцать",
    "сорок",
    "пятьдесят",
    "шестьдесят",
    "семьдесят",
    "восемьдесят",
    "девяносто",
];
const RU_HUNDREDS: [&str; 10] = [
    "",
    "сто",
    "двести",
    "триста",
    "четыреста",
    "пятьсот",
    "шестьсот",
    "семьсот",
    "восемьсот",
    "девятьсот",
];

/// Scale words as (one, few, many) plural forms; thousands are feminine
const RU_SCALES: [(&str, &str, &str, bool); 6] = [
    ("тысяча", "тысячи", "тысяч", true),
    ("миллион", "миллиона", "миллионов", false),
    ("миллиард", "миллиарда", "миллиардов", false),
    ("триллион", "триллиона", "триллионов", false),
    ("квадриллион", "квадриллиона", "квадриллионов", false),
    ("квинтиллион", "квинтиллиона", "квинтиллионов", false),
];

/// Russian cardinal numbers
#[derive(Debug, Default, Clone, Copy)]
pub struct RussianVerbalizer;

impl RussianVerbalizer {
    fn triplet(n: u64, feminine: bool, words: &mut Vec<&'static str>) {
        let hundreds = (n / 100) as usize;
        let rest = (n % 100) as usize;

        if hundreds > 0 {
            words.push(RU_HUNDREDS[hundreds]);
        }
        match rest {
            0 => {}
            10..=19 => words.push(RU_TEENS[rest - 10]),
            _ => {
                let tens = rest / 10;
                let ones = rest % 10;
                if tens >= 2 {
                    words.push(RU_TENS[tens]);
                }
                if ones > 0 {
                    if feminine && ones <= 2 {
                        words.push(RU_ONES_FEMININE[ones]);
                    } else {
                        words.push(RU_ONES[ones]);
                    }
                }
            }
        }
    }

    fn plural(n: u64, one: &'static str, few: &'static str, many: &'static str) -> &'static str {
        if (11..=14).contains(&(n % 100)) {
            return many;
        }
        match n % 10 {
            1 => one,
            2..=4 => few,
            _ => many,
        }
    }
}

impl NumberVerbalizer for RussianVerbalizer {
    fn verbalize(&self, n: u64) -> String {
        if n == 0 {
            return RU_ONES[0].to_string();
        }

        let mut groups = Vec::new();
        let mut rest = n;
        while rest > 0 {
            groups.push(rest % 1000);
            rest /= 1000;
        }

        let mut words = Vec::new();
        for (idx, &group) in groups.iter().enumerate().rev() {
            if group == 0 {
                continue;
            }
            if idx == 0 {
                Self::triplet(group, false, &mut words);
            } else {
                let (one, few, many, feminine) = RU_SCALES[idx - 1];
                Self::triplet(group, feminine, &mut words);
                words.push(Self::plural(group, one, few, many));
            }
        }
        words.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "минус"
    }

    fn point_word(&self) -> &'static str {
        "точка"
    }
}

// ============================================================================
// English
// ============================================================================

const EN_ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];
const EN_TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const EN_SCALES: [&str; 6] = [
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// English cardinal numbers, space-separated ("forty two")
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishVerbalizer;

impl EnglishVerbalizer {
    fn triplet(n: u64, words: &mut Vec<&'static str>) {
        let hundreds = (n / 100) as usize;
        let rest = (n % 100) as usize;

        if hundreds > 0 {
            words.push(EN_ONES[hundreds]);
            words.push("hundred");
        }
        match rest {
            0 => {}
            1..=19 => words.push(EN_ONES[rest]),
            _ => {
                words.push(EN_TENS[rest / 10]);
                if rest % 10 > 0 {
                    words.push(EN_ONES[rest % 10]);
                }
            }
        }
    }
}

impl NumberVerbalizer for EnglishVerbalizer {
    fn verbalize(&self, n: u64) -> String {
        if n == 0 {
            return EN_ONES[0].to_string();
        }

        let mut groups = Vec::new();
        let mut rest = n;
        while rest > 0 {
            groups.push(rest % 1000);
            rest /= 1000;
        }

        let mut words = Vec::new();
        for (idx, &group) in groups.iter().enumerate().rev() {
            if group == 0 {
                continue;
            }
            Self::triplet(group, &mut words);
            if idx > 0 {
                words.push(EN_SCALES[idx - 1]);
            }
        }
        words.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "minus"
    }

    fn point_word(&self) -> &'static str {
        "point"
    }
}
