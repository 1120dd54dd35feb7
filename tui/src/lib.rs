//! TUI rendering for billet using ratatui.
//!
//! The renderer consumes the card state read-only and publishes the
//! clickable regions of each frame into a [`HitMap`]; the input layer
//! resolves mouse clicks against that map on the next drain.

mod effects;
mod input;
mod theme;

pub use effects::{DriftGlyph, confetti_glyph, confetti_style, drift_layer, particle_cell};
pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use billet_core::{App, Classification, EVADER_STACKING, Extent, PageKind};
use billet_types::{YES_LABEL, reason_slides};

// ============================================================================
// Hit map
// ============================================================================

/// A clickable control on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Yes,
    No,
    NextReason,
    PrevReason,
}

#[derive(Debug, Clone, Copy)]
struct HitRegion {
    rect: Rect,
    stacking: usize,
    target: ClickTarget,
}

/// Clickable regions published by the most recent draw.
///
/// Regions carry the stacking order they were painted with, so a click on
/// overlapping controls resolves to the topmost one (the floating evader
/// always wins).
#[derive(Debug, Default)]
pub struct HitMap {
    viewport: Extent,
    regions: Vec<HitRegion>,
    evader: Option<Extent>,
}

impl HitMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_frame(&mut self, area: Rect) {
        self.viewport = Extent {
            width: area.width,
            height: area.height,
        };
        self.regions.clear();
        self.evader = None;
    }

    fn record(&mut self, rect: Rect, stacking: usize, target: ClickTarget) {
        self.regions.push(HitRegion {
            rect,
            stacking,
            target,
        });
    }

    /// Record the evasive button: a clickable region plus its rendered
    /// size, which the evasion controller measures on activation.
    fn record_evader(&mut self, rect: Rect, stacking: usize) {
        self.evader = Some(Extent {
            width: rect.width,
            height: rect.height,
        });
        self.record(rect, stacking, ClickTarget::No);
    }

    /// Topmost control containing the given cell, if any.
    #[must_use]
    pub fn resolve(&self, column: u16, row: u16) -> Option<ClickTarget> {
        self.regions
            .iter()
            .filter(|region| region.rect.contains(Position::new(column, row)))
            .max_by_key(|region| region.stacking)
            .map(|region| region.target)
    }

    /// Frame size at draw time, in cells.
    #[must_use]
    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    /// Rendered size of the evasive button, when it was drawn this frame.
    #[must_use]
    pub fn evader_extent(&self) -> Option<Extent> {
        self.evader
    }
}

// ============================================================================
// Draw
// ============================================================================

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App, hits: &mut HitMap) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    hits.begin_frame(frame.area());

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    if !app.is_revealed() {
        draw_preloader(frame, app, &palette, &glyphs);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Active page
            Constraint::Length(1), // Deck ribbon
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_active_page(frame, app, hits, chunks[0], &palette, &glyphs);
    draw_ribbon(frame, app, chunks[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);

    // Overlays in stacking order: confetti first, the floating evader
    // paints above everything.
    draw_confetti(frame, app, &palette, &glyphs);
    draw_evader(frame, app, hits, &palette);
}

fn draw_preloader(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = centered_rect(frame.area(), 30, 3);
    let spinner = spinner_frame(app.frame() as usize / 4, app.ui_options());
    let line = Line::from(vec![
        Span::styled(format!("{spinner} "), Style::default().fg(palette.rose)),
        Span::styled("Sealing the envelope", styles::hint(palette)),
        Span::styled(format!(" {}", glyphs.envelope), Style::default().fg(palette.gold)),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        area,
    );
}

fn draw_active_page(
    frame: &mut Frame,
    app: &App,
    hits: &mut HitMap,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let deck = app.deck();
    let slot = deck.slots()[deck.current_index()];

    // Drift layer first, behind the copy.
    for drift in drift_layer(
        area,
        deck.current_index(),
        app.frame(),
        app.ui_options(),
        palette,
        glyphs,
    ) {
        if let Some(cell) = frame
            .buffer_mut()
            .cell_mut(Position::new(drift.x, drift.y))
        {
            cell.set_symbol(drift.symbol);
            cell.set_style(drift.style);
        }
    }

    match slot.kind {
        PageKind::Cover => draw_cover(frame, app, area, palette, glyphs),
        PageKind::Letter => draw_letter(frame, app, area, palette, glyphs),
        PageKind::Reasons => {
            draw_reasons(frame, app, hits, area, slot.stacking, palette, glyphs);
        }
        PageKind::Question => {
            draw_question(frame, app, hits, area, slot.stacking, palette, glyphs);
        }
        PageKind::Finale => draw_finale(frame, app, area, palette, glyphs),
    }
}

fn page_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(2))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(palette.gold)
                .add_modifier(Modifier::BOLD),
        )
}

fn draw_cover(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let card = centered_rect(area, area.width.saturating_sub(8).min(52), 9);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} For {} {}", glyphs.heart, app.recipient(), glyphs.heart),
            styles::title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A small card, sealed with intent.",
            styles::body(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} to open", glyphs.arrow_right),
            styles::hint(palette),
        )),
    ];
    frame.render_widget(Clear, card);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(page_block("a letter", palette)),
        card,
    );
}

fn draw_letter(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let card = centered_rect(area, area.width.saturating_sub(6).min(60), 11);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Dear {},", app.recipient()),
            styles::title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Some things are easier typed than said out loud.",
            styles::body(palette),
        )),
        Line::from(Span::styled(
            "So here they are, one page at a time.",
            styles::body(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} keep turning {}", glyphs.arrow_left, glyphs.arrow_right),
            styles::hint(palette),
        )),
    ];
    frame.render_widget(Clear, card);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(page_block("first things first", palette)),
        card,
    );
}

fn draw_reasons(
    frame: &mut Frame,
    app: &App,
    hits: &mut HitMap,
    area: Rect,
    stacking: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let carousel = app.carousel();
    let slide = reason_slides()[carousel.current_slide()];

    let card = centered_rect(area, area.width.saturating_sub(6).min(60), 12);
    frame.render_widget(Clear, card);
    frame.render_widget(page_block("why you", palette), card);

    let inner = card.inner(Margin::new(2, 1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Slide window
            Constraint::Length(1), // Slide dots
            Constraint::Length(3), // Controls
        ])
        .split(inner);

    // The slide window shows exactly one slide at full opacity.
    let slide_lines = vec![
        Line::from(Span::styled(slide.title, styles::title(palette))),
        Line::from(""),
        Line::from(Span::styled(slide.body, styles::body(palette))),
    ];
    frame.render_widget(
        Paragraph::new(slide_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let dots: Vec<Span> = (0..reason_slides().len())
        .map(|index| {
            if carousel.is_visible(index) {
                Span::styled(
                    format!("{} ", glyphs.dot_active),
                    Style::default().fg(palette.rose),
                )
            } else {
                Span::styled(
                    format!("{} ", glyphs.dot_upcoming),
                    Style::default().fg(palette.text_muted),
                )
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        rows[1],
    );

    // Carousel controls: back, then the forward button whose label flips
    // on the last slide.
    let back_label = format!("{} Back", glyphs.arrow_left);
    let advance_label = format!("{} {}", carousel.advance_label(), glyphs.arrow_right);
    let back_rect = button_rect(rows[2], &back_label, ButtonSlot::Left);
    let advance_rect = button_rect(rows[2], &advance_label, ButtonSlot::Right);

    draw_button(frame, back_rect, &back_label, styles::button(palette), palette);
    draw_button(
        frame,
        advance_rect,
        &advance_label,
        styles::button_affirmative(palette),
        palette,
    );
    hits.record(back_rect, stacking, ClickTarget::PrevReason);
    hits.record(advance_rect, stacking, ClickTarget::NextReason);
}

fn draw_question(
    frame: &mut Frame,
    app: &App,
    hits: &mut HitMap,
    area: Rect,
    stacking: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let card = centered_rect(area, area.width.saturating_sub(6).min(56), 11);
    frame.render_widget(Clear, card);
    frame.render_widget(page_block("the question", palette), card);

    let inner = card.inner(Margin::new(2, 1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Prompt
            Constraint::Length(3), // Buttons
        ])
        .split(inner);

    let prompt = vec![
        Line::from(Span::styled(
            format!("So, {}.", app.recipient()),
            styles::body(palette),
        )),
        Line::from(Span::styled(
            format!("{} will you be mine? {}", glyphs.flower, glyphs.flower),
            styles::title(palette),
        )),
    ];
    frame.render_widget(
        Paragraph::new(prompt).alignment(Alignment::Center),
        rows[0],
    );

    let yes_rect = button_rect(rows[1], YES_LABEL, ButtonSlot::Left);
    draw_button(
        frame,
        yes_rect,
        YES_LABEL,
        styles::button_affirmative(palette),
        palette,
    );
    hits.record(yes_rect, stacking, ClickTarget::Yes);

    // The evasive button occupies its home slot only until it starts
    // dodging; while floating it is drawn (and recorded) as an overlay.
    if !app.evader().is_floating() {
        let no_rect = button_rect(rows[1], app.evader().label(), ButtonSlot::Right);
        draw_button(
            frame,
            no_rect,
            app.evader().label(),
            styles::button_evasive(palette),
            palette,
        );
        hits.record_evader(no_rect, stacking);
    }
}

fn draw_finale(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let card = centered_rect(area, area.width.saturating_sub(8).min(52), 9);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{0} {0} It's official {0} {0}", glyphs.heart),
            styles::title(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Best decision you've made all day, {}.", app.recipient()),
            styles::body(palette),
        )),
        Line::from(""),
        Line::from(Span::styled("q to tuck the card away", styles::hint(palette))),
    ];
    frame.render_widget(Clear, card);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(page_block("sealed", palette)),
        card,
    );
}

fn draw_ribbon(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let dots: Vec<Span> = app
        .deck()
        .slots()
        .iter()
        .map(|slot| match slot.classification {
            Classification::Active => Span::styled(
                format!("{} ", glyphs.dot_active),
                Style::default().fg(palette.rose),
            ),
            Classification::Flipped => Span::styled(
                format!("{} ", glyphs.dot_flipped),
                Style::default().fg(palette.rose_dim),
            ),
            Classification::Upcoming => Span::styled(
                format!("{} ", glyphs.dot_upcoming),
                Style::default().fg(palette.text_muted),
            ),
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let hint = if app.deck().active_page().hosts_carousel() {
        format!("{}/{} reasons  ·  q quit", glyphs.arrow_left, glyphs.arrow_right)
    } else {
        format!("{}/{} turn  ·  q quit", glyphs.arrow_left, glyphs.arrow_right)
    };
    let mut spans = vec![Span::styled(hint, styles::hint(palette))];
    if app.music_playing() {
        spans.push(Span::styled(
            format!("  {}", glyphs.note),
            Style::default().fg(palette.gold),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_confetti(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = frame.area();
    for particle in app.particles() {
        let Some((x, y)) = particle_cell(particle, area) else {
            continue;
        };
        if let Some(cell) = frame.buffer_mut().cell_mut(Position::new(x, y)) {
            cell.set_symbol(confetti_glyph(particle.tint, glyphs));
            cell.set_style(confetti_style(particle.tint, palette));
        }
    }
}

fn draw_evader(frame: &mut Frame, app: &App, hits: &mut HitMap, palette: &Palette) {
    let Some(position) = app.evader().float_position() else {
        return;
    };
    let label = app.evader().label();
    let wanted = Rect::new(
        position.x,
        position.y,
        button_width(label),
        BUTTON_HEIGHT,
    );
    let rect = wanted.intersection(frame.area());
    if rect.is_empty() {
        return;
    }
    frame.render_widget(Clear, rect);
    draw_button(frame, rect, label, styles::button_evasive(palette), palette);
    hits.record_evader(rect, EVADER_STACKING);
}

// ============================================================================
// Widget helpers
// ============================================================================

const BUTTON_HEIGHT: u16 = 3;

fn button_width(label: &str) -> u16 {
    label.width() as u16 + 4
}

#[derive(Clone, Copy)]
enum ButtonSlot {
    Left,
    Right,
}

/// Place a button in the left or right half of a control row.
fn button_rect(row: Rect, label: &str, slot: ButtonSlot) -> Rect {
    let width = button_width(label).min(row.width);
    let half = row.width / 2;
    let x = match slot {
        ButtonSlot::Left => row.x + (half.saturating_sub(width)) / 2,
        ButtonSlot::Right => row.x + half + (half.saturating_sub(width)) / 2,
    };
    Rect::new(x, row.y, width, BUTTON_HEIGHT.min(row.height))
}

fn draw_button(frame: &mut Frame, rect: Rect, label: &str, style: Style, palette: &Palette) {
    if rect.is_empty() {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(style);
    frame.render_widget(
        Paragraph::new(label).alignment(Alignment::Center).block(block),
        rect,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::{ClickTarget, HitMap};
    use billet_core::EVADER_STACKING;
    use ratatui::layout::Rect;

    #[test]
    fn overlapping_regions_resolve_to_the_topmost() {
        let mut hits = HitMap::new();
        hits.begin_frame(Rect::new(0, 0, 80, 24));
        hits.record(Rect::new(10, 10, 20, 3), 2, ClickTarget::Yes);
        hits.record_evader(Rect::new(12, 10, 10, 3), EVADER_STACKING);

        assert_eq!(hits.resolve(15, 11), Some(ClickTarget::No));
        assert_eq!(hits.resolve(10, 11), Some(ClickTarget::Yes));
        assert_eq!(hits.resolve(70, 20), None);
    }

    #[test]
    fn begin_frame_clears_stale_regions() {
        let mut hits = HitMap::new();
        hits.begin_frame(Rect::new(0, 0, 80, 24));
        hits.record(Rect::new(0, 0, 5, 3), 1, ClickTarget::NextReason);
        hits.begin_frame(Rect::new(0, 0, 80, 24));
        assert_eq!(hits.resolve(1, 1), None);
        assert_eq!(hits.evader_extent(), None);
    }

    #[test]
    fn evader_extent_tracks_the_recorded_rect() {
        let mut hits = HitMap::new();
        hits.begin_frame(Rect::new(0, 0, 80, 24));
        hits.record_evader(Rect::new(3, 4, 8, 3), 1);
        let extent = hits.evader_extent().unwrap();
        assert_eq!((extent.width, extent.height), (8, 3));
    }
}
