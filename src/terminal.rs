// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based depth viewer
//!
//! Renders the live grayscale depth preview using Unicode half-block
//! characters for improved vertical resolution. This is the display context:
//! it pulls the latest frame from the handoff on its own schedule and applies
//! the fixed presentation transform while sampling.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use tracing::error;

use crate::config::Config;
use crate::constants::timing::DISPLAY_POLL_INTERVAL;
use crate::depth::{DisplayOrientation, GrayscaleFrame};
use crate::pipelines::DepthPreviewPipeline;
use crate::storage;

/// Run the terminal depth viewer
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pipeline = DepthPreviewPipeline::start(config);
    let handoff = pipeline.handoff();

    let mut frame_widget = DepthFrameWidget::new(DisplayOrientation::default());
    let mut show_help = false;
    let mut status_message = build_status_message(config);

    loop {
        // Pull whatever is newest; the handoff already collapses to latest
        if let Some(frame) = handoff.current_frame() {
            frame_widget.update_frame(frame);
        }

        // Draw
        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let preview_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            f.render_widget(&frame_widget, preview_area);

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };

            let status = StatusBar {
                message: &status_message,
            };
            f.render_widget(status, status_area);
        })?;

        // Handle input with timeout for frame updates
        if event::poll(DISPLAY_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            // 'p' to save a snapshot
            if key.code == KeyCode::Char('p') {
                show_help = false;
                if let Some(frame) = &frame_widget.frame {
                    let path = storage::default_snapshot_path();
                    match storage::write_snapshot(frame, frame_widget.orientation, &path) {
                        Ok(()) => {
                            status_message = format!("Saved: {}", path.display());
                        }
                        Err(e) => {
                            error!("Failed to save snapshot: {}", e);
                            status_message = format!("Error: {}", e);
                        }
                    }
                } else {
                    status_message = "No frame to save yet".to_string();
                }
            }

            // 'h' to toggle help
            if key.code == KeyCode::Char('h') {
                show_help = !show_help;
                status_message = if show_help {
                    build_help_message()
                } else {
                    build_status_message(config)
                };
            }

            // 'q' also quits
            if key.code == KeyCode::Char('q') {
                break;
            }
        }
    }

    pipeline.stop();
    Ok(())
}

fn build_status_message(config: &Config) -> String {
    format!(
        "{}x{} | ceiling {:.1} m | 'p' snapshot | 'h' help | 'q' quit",
        config.source.width, config.source.height, config.max_depth_meters
    )
}

fn build_help_message() -> String {
    "p: Save snapshot | h: Toggle help | q/Ctrl+C: Quit".to_string()
}

/// Widget that renders a grayscale frame using half-block characters
struct DepthFrameWidget {
    frame: Option<GrayscaleFrame>,
    orientation: DisplayOrientation,
}

impl DepthFrameWidget {
    fn new(orientation: DisplayOrientation) -> Self {
        Self {
            frame: None,
            orientation,
        }
    }

    fn update_frame(&mut self, frame: GrayscaleFrame) {
        self.frame = Some(frame);
    }

    /// Sample one display-space pixel as a terminal color
    fn sample(&self, frame: &GrayscaleFrame, dx: u32, dy: u32) -> Color {
        let (display_width, display_height) =
            self.orientation.display_size(frame.width, frame.height);
        let dx = dx.min(display_width.saturating_sub(1));
        let dy = dy.min(display_height.saturating_sub(1));
        let (sx, sy) = self
            .orientation
            .source_coords(dx, dy, frame.width, frame.height);
        let v = frame.pixel(sx, sy);
        Color::Rgb(v, v, v)
    }
}

impl Widget for &DepthFrameWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = &self.frame else {
            // No frame yet - show placeholder
            let msg = "Waiting for depth frames...";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, ratatui::style::Style::default());
            }
            return;
        };

        // Presentation dimensions after the fixed mirror+rotate transform
        let (disp_w, disp_h) = self.orientation.display_size(frame.width, frame.height);

        // Calculate display dimensions maintaining aspect ratio
        // Each terminal cell displays 2 vertical pixels using half-block characters
        let frame_aspect = disp_w as f64 / disp_h as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        // Scale factors from terminal cells to presentation pixels
        let x_scale = disp_w as f64 / display_width as f64;
        let y_scale = disp_h as f64 / (display_height * 2) as f64;

        // Render using half-block characters
        // Each terminal cell represents 2 vertical pixels:
        // - Upper half (▀) colored with fg
        // - Lower half colored with bg
        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let dx = (tx as f64 * x_scale) as u32;
                let dy_top = (ty as f64 * 2.0 * y_scale) as u32;
                let dy_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top_color = self.sample(frame, dx, dy_top);
                let bottom_color = self.sample(frame, dx, dy_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        // Render text
        let text = if self.message.len() > area.width as usize {
            &self.message[..area.width as usize]
        } else {
            self.message
        };

        buf.set_string(
            area.x,
            area.y,
            text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
        );
    }
}
