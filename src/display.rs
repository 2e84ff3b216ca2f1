/// Rendering layer. All terminal I/O lives here.
///
/// The game core hands over a list of `DrawRequest`s in logical viewport
/// coordinates; this module scales them onto the terminal grid and resolves
/// sprite ids through the asset manifest. No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kokaton_shooter::assets::{AssetManifest, SpriteId, Tint};
use kokaton_shooter::draw::DrawRequest;
use kokaton_shooter::geometry::{Vec2, Viewport};
use kokaton_shooter::player::WeaponTier;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIER: Color = Color::Cyan;
const C_HUD_BOSS: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Stars per background tile, as fractions of the viewport.
const STARS: [(f32, f32); 12] = [
    (0.05, 0.12),
    (0.13, 0.71),
    (0.22, 0.35),
    (0.31, 0.88),
    (0.38, 0.05),
    (0.47, 0.52),
    (0.55, 0.24),
    (0.63, 0.93),
    (0.71, 0.41),
    (0.79, 0.66),
    (0.88, 0.17),
    (0.95, 0.79),
];

pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Grey => Color::Grey,
        Tint::DarkGrey => Color::DarkGrey,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
        Tint::Yellow => Color::Yellow,
        Tint::Magenta => Color::Magenta,
        Tint::Cyan => Color::Cyan,
    }
}

/// Maps logical viewport coordinates onto the bordered play area.
pub struct Screen {
    pub width: u16,
    pub height: u16,
    viewport: Viewport,
}

impl Screen {
    pub fn new(width: u16, height: u16, viewport: Viewport) -> Self {
        Screen {
            width,
            height,
            viewport,
        }
    }

    /// Play area: inside the border, between the HUD row and the hint row.
    fn inner(&self) -> (u16, u16, u16, u16) {
        let left = 1;
        let top = 2;
        let w = self.width.saturating_sub(2).max(1);
        let h = self.height.saturating_sub(4).max(1);
        (left, top, w, h)
    }

    /// Terminal cell for a logical point, or `None` if it falls outside.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.viewport.width || p.y >= self.viewport.height {
            return None;
        }
        let (left, top, w, h) = self.inner();
        let col = left + (p.x / self.viewport.width * w as f32) as u16;
        let row = top + (p.y / self.viewport.height * h as f32) as u16;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    screen: &Screen,
    assets: &AssetManifest,
    draws: &[DrawRequest],
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;

    for request in draws {
        match request {
            DrawRequest::Backdrop { id, x } => draw_backdrop(out, screen, assets, *id, *x)?,
            DrawRequest::Sprite { id, rect } => {
                draw_glyph(out, screen, assets, *id, None, rect.center())?
            }
            DrawRequest::Circle { center, tint, .. } => {
                draw_glyph(out, screen, assets, SpriteId::Bomb, Some(*tint), *center)?
            }
            DrawRequest::Hud {
                score,
                lives,
                tier,
                boss_hp,
            } => draw_hud(out, screen, assets, *score, *lives, *tier, *boss_hp)?,
            DrawRequest::GameOver { score } => draw_game_over(out, screen, *score)?,
        }
    }

    draw_controls_hint(out, screen)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

/// A star field per tile; the flipped tile mirrors it horizontally.
fn draw_backdrop<W: Write>(
    out: &mut W,
    screen: &Screen,
    assets: &AssetManifest,
    id: SpriteId,
    offset: f32,
) -> std::io::Result<()> {
    let vw = screen.viewport.width;
    let vh = screen.viewport.height;
    for &(fx, fy) in STARS.iter() {
        let fx = if id == SpriteId::BackgroundFlipped { 1.0 - fx } else { fx };
        let p = Vec2::new(offset + fx * vw, fy * vh);
        draw_glyph(out, screen, assets, id, None, p)?;
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Print the sprite's glyph centred on `center`.
fn draw_glyph<W: Write>(
    out: &mut W,
    screen: &Screen,
    assets: &AssetManifest,
    id: SpriteId,
    tint: Option<Tint>,
    center: Vec2,
) -> std::io::Result<()> {
    let Some(glyph) = assets.glyph(id) else {
        return Ok(());
    };
    let Some((col, row)) = screen.cell(center) else {
        return Ok(());
    };
    let half = glyph.glyph.chars().count() as u16 / 2;
    let col = col.saturating_sub(half).max(1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(tint_color(tint.unwrap_or(glyph.tint))))?;
    out.queue(Print(&glyph.glyph))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    screen: &Screen,
    assets: &AssetManifest,
    score: u32,
    lives: u32,
    tier: WeaponTier,
    boss_hp: Option<u32>,
) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", score)))?;

    // Beam tier, centre
    let tier_str = format!("[ BEAM {} ]", tier.index());
    let tx = (screen.width / 2).saturating_sub(tier_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIER))?;
    out.queue(Print(&tier_str))?;

    // Boss HP + lives, right side
    let boss_tag = match boss_hp {
        Some(hp) => format!("BOSS {:>2}  ", hp),
        None => String::new(),
    };
    let (icon, icon_color) = match assets.glyph(SpriteId::LifeIcon) {
        Some(g) => (g.glyph.as_str(), tint_color(g.tint)),
        None => ("♥", Color::Red),
    };
    let lives_str = format!("Lives:{}", icon.repeat(lives as usize));
    let right_len = boss_tag.chars().count() + lives_str.chars().count();
    let rx = screen.width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;

    if !boss_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
        out.queue(Print(&boss_tag))?;
    }
    out.queue(style::SetForegroundColor(icon_color))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←↑↓→ / WASD : Move   SPACE : Shoot   0 1 2 : Beam   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, screen: &Screen, score: u32) -> std::io::Result<()> {
    let score_line = format!("Score: {:>6}", score);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = screen.width / 2;
    let total_rows = lines.len() + 2; // 3 box lines + score + hint
    let start_row = (screen.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&score_line))?;

    let hint = "Press any key";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}
