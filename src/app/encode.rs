use eframe::egui::Color32;

/// Ordinal region -> color mapping. Domain entries are paired with the
/// palette by position; anything outside the domain gets the fallback.
pub struct ColorScale {
    domain: &'static [&'static str],
    range: &'static [Color32],
    fallback: Color32,
}

/// ColorBrewer Set2, the first five entries.
const SET2: [Color32; 5] = [
    Color32::from_rgb(0x66, 0xc2, 0xa5),
    Color32::from_rgb(0xfc, 0x8d, 0x62),
    Color32::from_rgb(0x8d, 0xa0, 0xcb),
    Color32::from_rgb(0xe7, 0x8a, 0xc3),
    Color32::from_rgb(0xa6, 0xd8, 0x54),
];

const CONTINENTS: [&str; 5] = ["Asia", "Europe", "Africa", "Oceania", "Americas"];

const FALLBACK: Color32 = Color32::from_rgb(0xb3, 0xb3, 0xb3);

impl ColorScale {
    pub fn world() -> Self {
        Self {
            domain: &CONTINENTS,
            range: &SET2,
            fallback: FALLBACK,
        }
    }

    pub fn color(&self, region: &str) -> Color32 {
        self.domain
            .iter()
            .position(|entry| *entry == region)
            .and_then(|index| self.range.get(index).copied())
            .unwrap_or(self.fallback)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Color32)> + '_ {
        self.domain
            .iter()
            .zip(self.range.iter())
            .map(|(name, color)| (*name, *color))
    }
}

/// Linear value -> radius mapping. Out-of-domain values extrapolate
/// rather than clamp; the population filter keeps realistic inputs
/// loosely inside the domain, so the open ends are intended.
pub struct SizeScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl SizeScale {
    pub fn population() -> Self {
        Self {
            domain: (0.0, 1_400_000_000.0),
            range: (7.0, 55.0),
        }
    }

    pub fn radius(&self, value: u64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value as f64 - d0) / (d1 - d0);
        r0 + ((r1 - r0) as f64 * t) as f32
    }
}
