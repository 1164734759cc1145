//! Localized countdown text (Arabic / English)

use classtime_api::{CountdownBreakdown, LifecycleStatus, Locale};

/// Code point of ARABIC-INDIC DIGIT ZERO; digit `d` lives at this plus `d`.
const ARABIC_INDIC_ZERO: u32 = 0x0660;

struct UnitNames {
    singular: &'static str,
    plural: &'static str,
}

impl UnitNames {
    // Arabic has more than two number forms; a plain singular/plural pair is
    // what the booking UI shows.
    fn pick(&self, n: u64) -> &'static str {
        if n == 1 { self.singular } else { self.plural }
    }
}

struct LocaleText {
    in_progress: &'static str,
    ended: &'static str,
    separator: &'static str,
    units: [UnitNames; 4],
}

static EN: LocaleText = LocaleText {
    in_progress: "Session in progress",
    ended: "Session ended",
    separator: " ",
    units: [
        UnitNames { singular: "day", plural: "days" },
        UnitNames { singular: "hour", plural: "hours" },
        UnitNames { singular: "minute", plural: "minutes" },
        UnitNames { singular: "second", plural: "seconds" },
    ],
};

static AR: LocaleText = LocaleText {
    in_progress: "الحصة جارية الآن",
    ended: "انتهت الحصة",
    separator: " و ",
    units: [
        UnitNames { singular: "يوم", plural: "أيام" },
        UnitNames { singular: "ساعة", plural: "ساعات" },
        UnitNames { singular: "دقيقة", plural: "دقائق" },
        UnitNames { singular: "ثانية", plural: "ثوان" },
    ],
};

fn text(locale: Locale) -> &'static LocaleText {
    match locale {
        Locale::Ar => &AR,
        Locale::En => &EN,
    }
}

/// Render a number with Arabic-Indic digits: `2025` -> `٢٠٢٥`
pub fn to_arabic_numerals(n: u64) -> String {
    n.to_string().chars().map(arabic_digit).collect()
}

/// Replace Western digits in `s` for Arabic; other locales pass through.
pub fn localize_digits(s: &str, locale: Locale) -> String {
    match locale {
        Locale::Ar => s.chars().map(arabic_digit).collect(),
        Locale::En => s.to_string(),
    }
}

fn arabic_digit(c: char) -> char {
    match c.to_digit(10) {
        Some(d) => char::from_u32(ARABIC_INDIC_ZERO + d).unwrap_or(c),
        None => c,
    }
}

/// Render a number in the locale's digits
pub fn format_number(n: u64, locale: Locale) -> String {
    match locale {
        Locale::Ar => to_arabic_numerals(n),
        Locale::En => n.to_string(),
    }
}

/// Fixed phrase for a session that is no longer counting down
pub fn status_phrase(status: LifecycleStatus, locale: Locale) -> Option<&'static str> {
    let t = text(locale);
    match status {
        LifecycleStatus::Upcoming => None,
        LifecycleStatus::Active => Some(t.in_progress),
        LifecycleStatus::Completed => Some(t.ended),
    }
}

/// Render a countdown for display.
///
/// Active and Completed sessions get a fixed phrase regardless of the
/// breakdown. Upcoming sessions list units from the first non-zero one down
/// to seconds: leading zero units are dropped, inner zero units are kept
/// (`1 hour 0 minutes 5 seconds`).
pub fn format_countdown(
    breakdown: &CountdownBreakdown,
    status: LifecycleStatus,
    locale: Locale,
) -> String {
    if let Some(phrase) = status_phrase(status, locale) {
        return phrase.to_string();
    }

    let t = text(locale);
    let values = [
        breakdown.days,
        breakdown.hours,
        breakdown.minutes,
        breakdown.seconds,
    ];

    // Seconds are always shown, so a sub-second countdown reads "0 seconds".
    let first = values.iter().position(|&v| v > 0).unwrap_or(values.len() - 1);

    values[first..]
        .iter()
        .zip(&t.units[first..])
        .map(|(&value, unit)| format!("{} {}", format_number(value, locale), unit.pick(value)))
        .collect::<Vec<_>>()
        .join(t.separator)
}
