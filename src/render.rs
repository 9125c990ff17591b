//! SVG rendering of a lineup graphic.
//!
//! The pitch keeps a fixed 3:4 aspect ratio; slot coordinates are percentages,
//! so the output scales with `RenderOptions::width`.

use crate::lineup::LineupBuilder;
use lineup_protocol::{PlayerRecord, Slot};
use reqwest::Url;
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const PITCH_FILL: &str = "#2b4235";
const LINE: &str = "#4ade80";
const MARKER_FILL: &str = "#2a2a2a";
const LABEL_FILL: &str = "#1a2e22";
const CAPTAIN_FILL: &str = "#facc15";
const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

const PLACEHOLDER_PLAYER: &str = "M5.121 17.804A13.937 13.937 0 0112 16c2.5 0 4.847.655 6.879 1.804M15 10a3 3 0 11-6 0 3 3 0 016 0zm6 2a9 9 0 11-18 0 9 9 0 0118 0z";
const ICON_BADGE: &str = "M5 3v4M3 5h4M6 17v4m-2-2h4m5-16l2.286 6.857L21 12l-5.714 2.143L13 21l-2.286-6.857L5 12l5.714-2.143L13 3z";
const ICON_MANAGER: &str = "M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Pitch width in SVG user units; height follows at 4:3.
    pub width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: 600.0 }
    }
}

struct Canvas {
    w: f32,
    h: f32,
}

impl Canvas {
    fn px(&self, x_pct: f32) -> f32 {
        x_pct * self.w / 100.0
    }

    fn py(&self, y_pct: f32) -> f32 {
        y_pct * self.h / 100.0
    }

    fn marker_radius(&self) -> f32 {
        self.w * 0.045
    }
}

/// Renders the whole graphic as a standalone SVG document.
pub fn render_svg(lineup: &LineupBuilder, options: &RenderOptions) -> String {
    let canvas = Canvas {
        w: options.width.max(100.0),
        h: options.width.max(100.0) * 4.0 / 3.0,
    };
    let display = lineup.display();
    let slots = lineup.editor().slots();

    let mut svg = String::with_capacity(8192);
    let _ = write!(
        svg,
        r#"<svg xmlns="{SVG_NS}" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif">"#,
        w = canvas.w,
        h = canvas.h
    );

    build_defs(&mut svg, &canvas, slots);
    build_markings(&mut svg, &canvas);
    build_header(&mut svg, &canvas, lineup.title(), lineup.subtitle());
    if display.show_formation_label {
        build_formation_label(&mut svg, &canvas, &lineup.formation().name);
    }
    build_footer(&mut svg, &canvas, display.show_club_badge, display.show_manager);
    for (i, slot) in slots.iter().enumerate() {
        build_slot(
            &mut svg,
            &canvas,
            i,
            slot,
            lineup.is_captain(i),
            lineup.is_man_of_the_match(i),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// The player's photo URL when it is an absolute http(s) or data URL.
pub fn usable_image(player: &PlayerRecord) -> Option<&str> {
    let src = player.image_src()?;
    let url = Url::parse(src).ok()?;
    matches!(url.scheme(), "http" | "https" | "data").then_some(src)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn build_defs(svg: &mut String, canvas: &Canvas, slots: &[Slot]) {
    svg.push_str("<defs>");
    let r = canvas.marker_radius();
    for (i, slot) in slots.iter().enumerate() {
        if slot.player.as_ref().and_then(usable_image).is_some() {
            let _ = write!(
                svg,
                r#"<clipPath id="clip-{i}"><circle cx="{:.1}" cy="{:.1}" r="{r:.1}"/></clipPath>"#,
                canvas.px(slot.x),
                canvas.py(slot.y)
            );
        }
    }
    svg.push_str("</defs>");
}

fn build_markings(svg: &mut String, canvas: &Canvas) {
    let (w, h) = (canvas.w, canvas.h);
    let inset = w * 0.045;
    let stroke = format!(r#"fill="none" stroke="{LINE}" stroke-opacity="0.3""#);

    let _ = write!(
        svg,
        r#"<rect width="{w:.0}" height="{h:.0}" rx="{:.1}" fill="{PITCH_FILL}"/>"#,
        w * 0.013
    );
    // Outer boundary
    let _ = write!(
        svg,
        r#"<rect x="{inset:.1}" y="{inset:.1}" width="{:.1}" height="{:.1}" rx="4" {stroke}/>"#,
        w - 2.0 * inset,
        h - 2.0 * inset
    );
    // Halfway line, centre circle and spot
    let _ = write!(
        svg,
        r#"<line x1="{inset:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {stroke}/>"#,
        h / 2.0,
        w - inset,
        h / 2.0
    );
    let _ = write!(
        svg,
        r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" {stroke}/>"#,
        w / 2.0,
        h / 2.0,
        w * 0.125,
        h * 0.095
    );
    let _ = write!(
        svg,
        r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{LINE}" fill-opacity="0.3"/>"#,
        w / 2.0,
        h / 2.0
    );

    // Penalty and goal areas, top then bottom
    for (width_pct, height_pct) in [(60.0, 15.0), (30.0, 5.0)] {
        let bw = canvas.px(width_pct);
        let bh = canvas.py(height_pct);
        let x = (w - bw) / 2.0;
        for y in [canvas.py(5.0), h - canvas.py(5.0) - bh] {
            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{bh:.1}" {stroke}/>"#
            );
        }
    }
}

fn build_header(svg: &mut String, canvas: &Canvas, title: &str, subtitle: &str) {
    let x = canvas.w - canvas.w * 0.03;
    if !title.trim().is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{:.1}" fill="{WHITE}" font-size="{:.1}" font-weight="bold" letter-spacing="2" text-anchor="end">{}</text>"#,
            canvas.py(5.0),
            canvas.w * 0.055,
            escape(&title.to_uppercase())
        );
    }
    if !subtitle.trim().is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{x:.1}" y="{:.1}" fill="{LINE}" font-size="{:.1}" text-anchor="end">{}</text>"#,
            canvas.py(8.5),
            canvas.w * 0.038,
            escape(&subtitle.to_lowercase())
        );
    }
}

fn build_formation_label(svg: &mut String, canvas: &Canvas, name: &str) {
    let (x, y) = (canvas.px(4.0), canvas.py(2.0));
    let bw = canvas.w * 0.16;
    let bh = canvas.w * 0.055;
    let _ = write!(
        svg,
        r#"<g class="formation"><rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{bh:.1}" rx="4" fill="{LABEL_FILL}" stroke="{LINE}"/><text x="{:.1}" y="{:.1}" fill="{LINE}" font-size="{:.1}" font-weight="bold" text-anchor="middle" dominant-baseline="central">{}</text></g>"#,
        x + bw / 2.0,
        y + bh / 2.0,
        bh * 0.5,
        escape(name)
    );
}

fn build_icon_circle(svg: &mut String, cx: f32, cy: f32, r: f32, path: &str) {
    let _ = write!(
        svg,
        r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{MARKER_FILL}" stroke="{LINE}" stroke-width="2" stroke-dasharray="4 3"/>"#
    );
    let scale = r * 1.2 / 24.0;
    let _ = write!(
        svg,
        r#"<path transform="translate({:.1} {:.1}) scale({scale:.3})" d="{path}" fill="none" stroke="{WHITE}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
        cx - 12.0 * scale,
        cy - 12.0 * scale
    );
}

fn build_footer(svg: &mut String, canvas: &Canvas, club_badge: bool, manager: bool) {
    let r = canvas.marker_radius();
    let cx = canvas.px(9.0);
    let mut cy = canvas.py(93.0) - r;
    let step = r * 2.0 + canvas.w * 0.02;

    // Stacked bottom-up so the badge sits above the manager
    if manager {
        svg.push_str(r#"<g class="manager">"#);
        build_icon_circle(svg, cx, cy, r, ICON_MANAGER);
        svg.push_str("</g>");
        cy -= step;
    }
    if club_badge {
        svg.push_str(r#"<g class="club-badge">"#);
        build_icon_circle(svg, cx, cy, r, ICON_BADGE);
        svg.push_str("</g>");
    }
}

fn build_badge(svg: &mut String, cx: f32, cy: f32, fill: &str, glyph: &str) {
    let _ = write!(
        svg,
        r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="8" fill="{fill}"/><text x="{cx:.1}" y="{cy:.1}" fill="{BLACK}" font-size="10" font-weight="bold" text-anchor="middle" dominant-baseline="central">{glyph}</text>"#
    );
}

fn build_slot(
    svg: &mut String,
    canvas: &Canvas,
    index: usize,
    slot: &Slot,
    captain: bool,
    motm: bool,
) {
    let cx = canvas.px(slot.x);
    let cy = canvas.py(slot.y);
    let r = canvas.marker_radius();

    let _ = write!(svg, r#"<g class="slot" data-index="{index}">"#);
    let _ = write!(
        svg,
        r#"<text x="{cx:.1}" y="{:.1}" fill="{WHITE}" fill-opacity="0.75" font-size="11" text-anchor="middle">{}</text>"#,
        cy - r - 8.0,
        escape(&slot.role)
    );

    let image = slot.player.as_ref().and_then(usable_image);
    match image {
        Some(href) => {
            let _ = write!(
                svg,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{MARKER_FILL}"/><image href="{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" preserveAspectRatio="xMidYMid slice" clip-path="url(#clip-{index})"/><circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="none" stroke="{LINE}" stroke-width="2" stroke-dasharray="4 3"/>"#,
                escape(href),
                cx - r,
                cy - r,
                r * 2.0,
                r * 2.0
            );
        }
        None => build_icon_circle(svg, cx, cy, r, PLACEHOLDER_PLAYER),
    }

    if let Some(player) = &slot.player {
        let name = player.short_name.trim();
        if !name.is_empty() {
            let _ = write!(
                svg,
                r#"<text x="{cx:.1}" y="{:.1}" fill="{WHITE}" font-size="11" font-weight="bold" text-anchor="middle">{}</text>"#,
                cy + r + 14.0,
                escape(name)
            );
        }
    }

    let badge_y = cy - r * 0.9;
    let mut badge_x = cx + r * 0.6;
    if captain {
        build_badge(svg, badge_x, badge_y, CAPTAIN_FILL, "C");
        badge_x += 18.0;
    }
    if motm {
        build_badge(svg, badge_x, badge_y, LINE, "★");
    }

    svg.push_str("</g>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"A&B <"x">"#), "A&amp;B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn test_usable_image_rules() {
        let mut p = PlayerRecord {
            img_src: Some(" https://cdn.example.com/p.png ".into()),
            ..Default::default()
        };
        assert_eq!(usable_image(&p), Some("https://cdn.example.com/p.png"));

        p.img_src = Some("not a url".into());
        assert_eq!(usable_image(&p), None);

        p.img_src = Some("ftp://example.com/p.png".into());
        assert_eq!(usable_image(&p), None);

        p.img_src = None;
        assert_eq!(usable_image(&p), None);
    }

    #[test]
    fn test_bound_slot_gets_photo_name_and_badges() {
        let mut lineup = LineupBuilder::new(3);
        lineup.editor_mut().open_editor(10).unwrap();
        lineup
            .editor_mut()
            .bind_player(PlayerRecord {
                short_name: "O'Neil".into(),
                img_src: Some("https://cdn.example.com/p.png".into()),
                ..Default::default()
            })
            .unwrap();
        lineup
            .apply(crate::lineup::LineupCommand::SetCaptain(
                crate::lineup::SlotRef::index(10),
            ))
            .unwrap();

        let svg = render_svg(&lineup, &RenderOptions::default());
        assert_eq!(svg.matches(r#"<g class="slot""#).count(), 11);
        assert_eq!(svg.matches("<image ").count(), 1);
        assert!(svg.contains(r#"clip-path="url(#clip-10)""#));
        assert!(svg.contains("O&apos;Neil"));
        assert_eq!(svg.matches(">C</text>").count(), 1);
        assert!(svg.contains(">4-4-1-1<"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
