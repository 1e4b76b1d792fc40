use std::io;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use tictactoe::{
    cli::{self, Options},
    Board, Error, Mark, Session, Status, DEFAULT_NAMES, SQUARES,
};
use tracing::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame, Terminal,
};

fn main() -> io::Result<()> {
    let options = Options::parse();
    // Only log to a file, anything on stderr would tear up the screen.
    if let Some(path) = options.log_file.as_ref() {
        cli::init_tracing(Some(path), "info")?;
    }

    let ctx = na::SodiumCtx::new();
    let session = Session::new(&ctx);
    let notice: na::Cell<Option<String>> = session
        .errors
        .map(|err: &Error| Some(err.to_string()))
        .or_else(&session.messages.map(|_: &Status| None))
        .hold(None);

    let (name1, name2) = options.names().unwrap_or((DEFAULT_NAMES[0], DEFAULT_NAMES[1]));
    session.start_game(name1, name2);
    info!("starting tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui = Ui {
        board: session.board.clone(),
        status: session.status.clone(),
        notice,
    };
    let res = run(&mut terminal, &ui, &session);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, ui: &Ui, session: &Session) -> io::Result<()> {
    loop {
        let mut squares = [Rect::default(); SQUARES];
        terminal.draw(|f| squares = ui.draw(f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r') => session.restart_game(),
                KeyCode::Char(c @ '1'..='9') => {
                    session.play_turn(c as usize - '1' as usize);
                }
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = squares.iter().position(|area| {
                    (area.left()..area.right()).contains(&mouse.column)
                        && (area.top()..area.bottom()).contains(&mouse.row)
                });
                if let Some(index) = hit {
                    session.play_turn(index);
                }
            }
            _ => {}
        }
    }
}

struct Ui {
    board: na::Cell<Board>,
    status: na::Cell<Option<Status>>,
    notice: na::Cell<Option<String>>,
}

impl Ui {
    /// Draws everything and returns where each square ended up on screen.
    fn draw<B: Backend>(&self, f: &mut Frame<B>) -> [Rect; SQUARES] {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        let squares = self.draw_board(f, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        f.render_widget(self.info(), block.inner(chunks[1]));
        f.render_widget(block, chunks[1]);

        squares
    }

    fn info(&self) -> Paragraph<'static> {
        let mut text = match self.status.sample() {
            Some(status) => status.to_string(),
            None => String::from("No game yet"),
        };
        if let Some(notice) = self.notice.sample() {
            text.push_str("\n\n");
            text.push_str(&notice);
        }
        text.push_str("\n\nclick a square or press 1-9\nr: restart\nq: quit");
        Paragraph::new(text).wrap(Wrap { trim: false })
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect) -> [Rect; SQUARES] {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(thirds.as_ref())
            .split(area);

        let mut areas = [Rect::default(); SQUARES];
        for row in 0..3 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .horizontal_margin(3)
                .constraints(thirds.as_ref())
                .split(rows[row + 1]);
            for col in 0..3 {
                areas[row * 3 + col] = cols[col + 1];
            }
        }

        let board = self.board.sample();
        for (index, chunk) in areas.iter().enumerate() {
            let block = Block::default().borders(inner_borders(index));
            f.render_widget(RenderMark(board.get(index)), block.inner(*chunk));
            f.render_widget(block, *chunk);
        }
        areas
    }
}

/// Only the lines between squares are drawn, like a hash sign.
fn inner_borders(index: usize) -> Borders {
    let mut borders = Borders::ALL;
    if index < 3 {
        borders.remove(Borders::TOP);
    }
    if index >= 6 {
        borders.remove(Borders::BOTTOM);
    }
    if index % 3 == 0 {
        borders.remove(Borders::LEFT);
    }
    if index % 3 == 2 {
        borders.remove(Borders::RIGHT);
    }
    borders
}

struct RenderMark(Option<Mark>);

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }
        match self.0 {
            Some(Mark::X) => render_x(area, buf),
            Some(Mark::O) => render_o(area, buf),
            None => {}
        }
    }
}

fn render_x(area: Rect, buf: &mut tui::buffer::Buffer) {
    const LEFT: &str = "\\@\\";
    const RIGHT: &str = "/@/";

    // Columns to step over per line; the strokes are 3 characters wide.
    let span = area.width - 3;
    for y in 0..area.height {
        let x_right = (u32::from(span) * u32::from(y) / u32::from(area.height.max(2) - 1)) as u16;
        let x_right = x_right.min(span);
        let x_left = span - x_right;
        buf.set_string(area.x + x_right, area.y + y, LEFT, Style::default());
        buf.set_string(area.x + x_left, area.y + y, RIGHT, Style::default());
    }
}

fn render_o(area: Rect, buf: &mut tui::buffer::Buffer) {
    // Terminal cells are about twice as tall as they are wide.
    let radius_y = (f32::from(area.height) - 1.0) / 2.0;
    let radius_x = (f32::from(area.width) - 1.0) / 2.0;
    let center_x = f32::from(area.x) + radius_x;
    let center_y = f32::from(area.y) + radius_y;

    let steps = 4 * (area.width + area.height).max(8);
    for step in 0..steps {
        let angle = std::f32::consts::TAU * f32::from(step) / f32::from(steps);
        let (sin, cos) = angle.sin_cos();
        let x = (center_x + radius_x * cos).round() as u16;
        let y = (center_y + radius_y * sin).round() as u16;
        if area.left() <= x && x < area.right() && area.top() <= y && y < area.bottom() {
            buf.get_mut(x, y).set_char('@');
        }
    }
}
