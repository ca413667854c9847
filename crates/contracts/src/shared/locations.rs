//! Governorates and wilayats of the Sultanate of Oman.
//!
//! Static, read-only lookup table. Codes are the stable identifiers stored on
//! profiles; Arabic names are what the admin forms usually carry.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wilayat {
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Governorate {
    pub code: &'static str,
    pub name: &'static str,
    pub wilayats: &'static [Wilayat],
}

const fn w(code: &'static str, name: &'static str) -> Wilayat {
    Wilayat { code, name }
}

pub static GOVERNORATES: &[Governorate] = &[
    Governorate {
        code: "muscat",
        name: "محافظة مسقط",
        wilayats: &[
            w("muscat-city", "مسقط"),
            w("muttrah", "مطرح"),
            w("bawshar", "بوشر"),
            w("seeb", "السيب"),
            w("amerat", "العامرات"),
            w("qurayyat", "قريات"),
        ],
    },
    Governorate {
        code: "dhofar",
        name: "محافظة ظفار",
        wilayats: &[
            w("salalah", "صلالة"),
            w("taqah", "طاقة"),
            w("mirbat", "مرباط"),
            w("sadah", "سدح"),
            w("rakhyut", "رخيوت"),
            w("thumrait", "ثمريت"),
            w("dalkut", "ضلكوت"),
            w("muqshin", "المزيونة"),
            w("shalim", "شليم وجزر الحلانيات"),
        ],
    },
    Governorate {
        code: "musandam",
        name: "محافظة مسندم",
        wilayats: &[
            w("khasab", "خصب"),
            w("bukha", "بخاء"),
            w("daba", "دبا"),
            w("madha", "مدحاء"),
        ],
    },
    Governorate {
        code: "buraimi",
        name: "محافظة البريمي",
        wilayats: &[
            w("buraimi-city", "البريمي"),
            w("mahadah", "محضة"),
            w("sunainah", "السنينة"),
        ],
    },
    Governorate {
        code: "dakhliyah",
        name: "محافظة الداخلية",
        wilayats: &[
            w("nizwa", "نزوى"),
            w("bahla", "بهلاء"),
            w("manah", "منح"),
            w("adam", "أدم"),
            w("hamra", "الحمراء"),
            w("izki", "إزكي"),
            w("samail", "سمائل"),
            w("bidiyah", "بدية"),
        ],
    },
    Governorate {
        code: "north-batinah",
        name: "محافظة شمال الباطنة",
        wilayats: &[
            w("sohar", "صحار"),
            w("shinas", "شناص"),
            w("liwa", "لوى"),
            w("saham", "صحم"),
            w("khabourah", "الخابورة"),
            w("swayq", "السويق"),
        ],
    },
    Governorate {
        code: "south-batinah",
        name: "محافظة جنوب الباطنة",
        wilayats: &[
            w("rustaq", "الرستاق"),
            w("awabi", "العوابي"),
            w("nakhal", "نخل"),
            w("wadi-maawil", "وادي المعاول"),
            w("barka", "بركاء"),
            w("musanaa", "المصنعة"),
        ],
    },
    Governorate {
        code: "north-sharqiyah",
        name: "محافظة شمال الشرقية",
        wilayats: &[
            w("ibra", "إبراء"),
            w("mudhaibi", "المضيبي"),
            w("bidiyah-sharqiyah", "بدية"),
            w("qabil", "القابل"),
            w("wadi-bani-khalid", "وادي بني خالد"),
            w("dama-taeen", "دماء والطائيين"),
        ],
    },
    Governorate {
        code: "south-sharqiyah",
        name: "محافظة جنوب الشرقية",
        wilayats: &[
            w("sur", "صور"),
            w("masirah", "مصيرة"),
            w("jaalan-bani-bu-ali", "جعلان بني بو علي"),
            w("jaalan-bani-bu-hassan", "جعلان بني بو حسن"),
            w("kamil-wafi", "الكامل والوافي"),
        ],
    },
    Governorate {
        code: "dhahirah",
        name: "محافظة الظاهرة",
        wilayats: &[
            w("ibri", "عبري"),
            w("yanqul", "ينقل"),
            w("dhank", "ضنك"),
        ],
    },
    Governorate {
        code: "wusta",
        name: "محافظة الوسطى",
        wilayats: &[
            w("haima", "هيما"),
            w("mahout", "محوت"),
            w("duqm", "الدقم"),
            w("jazer", "الجازر"),
        ],
    },
];

static WILAYAT_BY_CODE: Lazy<HashMap<&'static str, (&'static Governorate, &'static Wilayat)>> =
    Lazy::new(|| {
        GOVERNORATES
            .iter()
            .flat_map(|g| g.wilayats.iter().map(move |wl| (wl.code, (g, wl))))
            .collect()
    });

/// Result of resolving a free-form location value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLocation {
    Governorate(&'static Governorate),
    Wilayat(&'static Governorate, &'static Wilayat),
}

impl ResolvedLocation {
    pub fn governorate(&self) -> &'static Governorate {
        match self {
            ResolvedLocation::Governorate(g) => g,
            ResolvedLocation::Wilayat(g, _) => g,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResolvedLocation::Governorate(g) => g.name,
            ResolvedLocation::Wilayat(_, wl) => wl.name,
        }
    }
}

pub fn governorate(code: &str) -> Option<&'static Governorate> {
    GOVERNORATES.iter().find(|g| g.code == code)
}

pub fn wilayat(code: &str) -> Option<(&'static Governorate, &'static Wilayat)> {
    WILAYAT_BY_CODE.get(code).copied()
}

/// Whether `wilayat_code` is one of the wilayats of `governorate_code`
pub fn wilayat_belongs_to(wilayat_code: &str, governorate_code: &str) -> bool {
    wilayat(wilayat_code)
        .map(|(g, _)| g.code == governorate_code)
        .unwrap_or(false)
}

/// Resolve a location given as a code or an Arabic name.
///
/// Wilayat names are not unique ("بدية" exists twice); the first match in
/// table order wins.
pub fn resolve(value: &str) -> Option<ResolvedLocation> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some((g, wl)) = wilayat(value) {
        return Some(ResolvedLocation::Wilayat(g, wl));
    }
    if let Some(g) = governorate(value) {
        return Some(ResolvedLocation::Governorate(g));
    }

    for g in GOVERNORATES {
        if g.name == value {
            return Some(ResolvedLocation::Governorate(g));
        }
        if let Some(wl) = g.wilayats.iter().find(|wl| wl.name == value) {
            return Some(ResolvedLocation::Wilayat(g, wl));
        }
    }
    None
}
