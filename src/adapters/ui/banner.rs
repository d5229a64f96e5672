//! Startup banner: "ClassSync" in figlet letters with a violet-to-sky gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Default class accent (#8B5CF6).
const VIOLET: (u8, u8, u8) = (0x8b, 0x5c, 0xf6);
/// Sky (#0EA5E9).
const SKY: (u8, u8, u8) = (0x0e, 0xa5, 0xe9);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Figlet rendering of the title, or the plain title if the font fails to load.
fn banner_lines() -> Vec<String> {
    let fallback = || vec!["ClassSync".to_string()];
    let Ok(font) = FIGfont::standard() else {
        return fallback();
    };
    match font.convert("ClassSync") {
        Some(figure) => figure.to_string().lines().map(str::to_string).collect(),
        None => fallback(),
    }
}

/// Prints the banner, then the version.
pub fn print_welcome() {
    let mut out = stdout();
    let lines = banner_lines();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(VIOLET, SKY, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SKY.0,
        g: SKY.1,
        b: SKY.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  schedule, conflicts, timetable\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
