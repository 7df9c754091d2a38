// Entry point: stickers demo
// Handles --theme and --help, then runs the TUI with a flex box page and a grid page.

use std::env;
use std::fs;
use std::process;
use std::sync::Mutex;

use bubbletea_rs::{
    Program, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel, window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss::{Color, Style};
use once_cell::sync::{Lazy, OnceCell};
use stickers::grid::infer_record;
use stickers::text::{display_width, fit_line};
use stickers::{Align, BorderKind, Cell, Direction, FlexBox, Grid, GridMsg, Row, Theme};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const STATUS_LINES: usize = 1;
// below this a nested box stops recursing
const NESTED_MIN: usize = 4;
const HELP: &str = "tab: grid  b: border  r: align  q: quit";
const GRID_HELP: &str = "tab: boxes  arrows: move  ctrl+s: sort  type: filter  enter: select  esc: clear/quit";

const PEOPLE: &[[&str; 4]] = &[
    ["Ann", "Oslo", "30", "88.5"],
    ["Bob", "Lima", "25", "72.0"],
    ["Al", "Kyiv", "40", "91.25"],
    ["Cyd", "Oslo", "35", "64.5"],
    ["Dee", "Pune", "28", "79.0"],
    ["Eli", "Lima", "52", "85.75"],
    ["Fay", "Rome", "19", "93.5"],
    ["Gus", "Kyiv", "44", "58.0"],
    ["Hal", "Pune", "31", "88.5"],
    ["Ida", "Rome", "27", "70.25"],
    ["Jo", "Oslo", "63", "77.0"],
    ["Kai", "Lima", "22", "81.5"],
    ["Lou", "Kyiv", "38", "66.0"],
    ["Mae", "Rome", "47", "90.0"],
    ["Ned", "Pune", "33", "74.5"],
];

static THEME: OnceCell<Theme> = OnceCell::new();

static STYLE_STATUS: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .background(Color::from_rgb(95, 95, 95))
        .foreground(Color::from_rgb(255, 255, 255))
        .padding(0, 1, 0, 1)
});
static STYLE_HELP: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .background(Color::from_rgb(95, 95, 95))
        .foreground(Color::from_rgb(255, 255, 255))
});
static STYLE_INFO: Lazy<Style> = Lazy::new(|| Style::new().faint(true));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Boxes,
    Table,
}

#[derive(Debug)]
enum Msg {
    WindowSize { width: usize, height: usize },
    NextPage,
    CycleBorder,
    CycleAlign,
    Grid(GridMsg),
    SortAtCursor,
    FilterChar(char),
    FilterBackspace,
    Select,
}

struct Demo {
    page: Page,
    width: usize,
    height: usize,
    border: usize,
    align: Align,
    theme: Theme,
    grid: Grid,
    status: String,
}

fn sample_grid(theme: Theme) -> stickers::Result<Grid> {
    let mut grid = Grid::new(80, 24, ["Name", "City", "Age", "Score"])?.with_theme(theme);
    grid.set_ratios(&[3, 3, 1, 2])?;
    grid.set_min_widths(&[6, 6, 5, 7])?;
    grid.add_rows(PEOPLE.iter().map(|r| infer_record(r.as_slice())).collect())?;
    Ok(grid)
}

impl Demo {
    fn new(theme: Theme) -> stickers::Result<Demo> {
        Ok(Demo {
            page: Page::Boxes,
            width: 80,
            height: 24,
            border: 0,
            align: Align::Left,
            grid: sample_grid(theme.clone())?,
            theme,
            status: String::new(),
        })
    }

    fn border_kind(&self) -> BorderKind {
        BorderKind::ALL[self.border % BorderKind::ALL.len()]
    }

    fn update(&mut self, msg: Msg) {
        handle_update(self, msg);
    }

    fn view(&self) -> String {
        match self.page {
            Page::Boxes => boxes_page(self).render(),
            Page::Table => {
                let status = if self.status.is_empty() {
                    GRID_HELP
                } else {
                    self.status.as_str()
                };
                let line = STYLE_STATUS.render(&fit_line(status, self.width.saturating_sub(2)));
                format!("{}\n{line}", self.grid.render())
            }
        }
    }
}

fn handle_update(d: &mut Demo, msg: Msg) {
    match msg {
        Msg::WindowSize { width, height } => {
            d.width = width;
            d.height = height;
            d.grid.resize(width, height.saturating_sub(STATUS_LINES));
        }
        Msg::NextPage => {
            d.page = match d.page {
                Page::Boxes => Page::Table,
                Page::Table => Page::Boxes,
            };
            debug!(page = ?d.page, "page switched");
        }
        Msg::CycleBorder => d.border = (d.border + 1) % BorderKind::ALL.len(),
        Msg::CycleAlign => d.align = d.align.next(),
        Msg::Grid(gm) => {
            if let Err(e) = d.grid.update(gm) {
                d.status = e.to_string();
            }
        }
        Msg::SortAtCursor => {
            let column = d.grid.cursor().col;
            if let Err(e) = d.grid.update(GridMsg::ToggleSort(column)) {
                d.status = e.to_string();
            }
        }
        Msg::FilterChar(ch) => d.grid.push_filter_char(ch),
        Msg::FilterBackspace => d.grid.pop_filter_char(),
        Msg::Select => {
            d.status = match d.grid.selected() {
                Some(value) => format!("selected: {value}"),
                None => "nothing selected".to_string(),
            };
            info!(status = %d.status, "grid selection");
        }
    }
}

fn size_label(width: usize, height: usize) -> String {
    format!("{width}x{height}")
}

fn nested_boxes(width: usize, height: usize, theme: &Theme, kind: BorderKind, level: usize) -> String {
    if width < NESTED_MIN || height < NESTED_MIN {
        return format!("{level}");
    }
    let mut fb = FlexBox::new(width, height);
    let inner = theme.clone();
    fb.new_row().add_cell(
        Cell::new(1, 1)
            .with_decoration(theme.palette_decoration(kind, level))
            .with_provider(move |w: usize, h: usize| nested_boxes(w, h, &inner, kind, level + 1)),
    );
    fb.render()
}

fn boxes_page(d: &Demo) -> FlexBox {
    let kind = d.border_kind();
    let theme = &d.theme;
    let mut fb = FlexBox::new(d.width, d.height);
    fb.set_align(d.align);

    let top = fb.new_row();
    for i in 0..3 {
        top.add_cell(
            Cell::new(1, 1)
                .with_decoration(theme.palette_decoration(kind, i))
                .with_provider(size_label),
        );
    }
    top.add_cell(
        Cell::new(2, 1)
            .with_decoration(theme.border_decoration(kind))
            .with_content(kind.name()),
    );

    let nested_theme = theme.clone();
    let (align, border) = (d.align.name(), kind.name());
    fb.new_row().add_cells([
        Cell::new(2, 4)
            .with_decoration(theme.border_decoration(kind))
            .with_provider(move |w: usize, h: usize| nested_boxes(w, h, &nested_theme, kind, 0)),
        Cell::new(1, 4)
            .with_style(STYLE_INFO.clone())
            .with_provider(move |w: usize, h: usize| {
                format!("interior {w}x{h}\nalign: {align}\nborder: {border}")
            }),
    ]);

    fb.add_row(Row::new().with_fixed_height(STATUS_LINES).with_cells([Cell::new(1, 1)
        .with_fixed_width(display_width(HELP))
        .with_style(STYLE_HELP.clone())
        .with_content(HELP)]));
    fb
}

// Adapter type implementing bubbletea-rs Model trait by delegating to Demo
struct TeaAdapter {
    inner: Demo,
}

impl TeaAdapter {
    fn on_key(&mut self, km: &KeyMsg) -> Option<bubbletea_rs::command::Cmd> {
        let ctrl = km.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(km.key, KeyCode::Char('c') | KeyCode::Char('C')) {
            return Some(bubbletea_rs::quit());
        }
        if km.key == KeyCode::Tab {
            self.inner.update(Msg::NextPage);
            return None;
        }
        match self.inner.page {
            Page::Boxes => match &km.key {
                KeyCode::Esc | KeyCode::Char('q') => return Some(bubbletea_rs::quit()),
                KeyCode::Char('b') => self.inner.update(Msg::CycleBorder),
                KeyCode::Char('r') => self.inner.update(Msg::CycleAlign),
                _ => {}
            },
            Page::Table => match &km.key {
                KeyCode::Esc => {
                    if self.inner.grid.filter().is_none() {
                        return Some(bubbletea_rs::quit());
                    }
                    self.inner.update(Msg::Grid(GridMsg::ClearFilter));
                }
                KeyCode::Up => self.inner.update(Msg::Grid(GridMsg::CursorMove(Direction::Up))),
                KeyCode::Down => self.inner.update(Msg::Grid(GridMsg::CursorMove(Direction::Down))),
                KeyCode::Left => self.inner.update(Msg::Grid(GridMsg::CursorMove(Direction::Left))),
                KeyCode::Right => self.inner.update(Msg::Grid(GridMsg::CursorMove(Direction::Right))),
                KeyCode::Enter => self.inner.update(Msg::Select),
                KeyCode::Backspace => self.inner.update(Msg::FilterBackspace),
                KeyCode::Char(ch) => {
                    if ctrl {
                        if matches!(ch, 's' | 'S') {
                            self.inner.update(Msg::SortAtCursor);
                        }
                    } else {
                        self.inner.update(Msg::FilterChar(*ch));
                    }
                }
                _ => {}
            },
        }
        None
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<bubbletea_rs::command::Cmd>) {
        let theme = THEME.get().cloned().unwrap_or_default();
        let inner = match Demo::new(theme) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("failed to build demo: {e}");
                process::exit(2);
            }
        };
        let mut adapter = TeaAdapter { inner };
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        adapter.inner.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        (adapter, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<bubbletea_rs::command::Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key(km);
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            self.inner.update(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        None
    }

    fn view(&self) -> String {
        self.inner.view()
    }
}

fn print_help() {
    println!("stickers-demo - flex box layout and data grid demo");
    println!();
    println!("Usage:");
    println!("  stickers-demo [--theme <path>]");
    println!();
    println!("Options:");
    println!("  --theme <path>   Load colours and glyphs from a JSON theme file.");
    println!("  --help           Show this help message.");
    println!();
    println!("Logs go to {}; set RUST_LOG to change the level.", log_path().display());
}

fn log_path() -> std::path::PathBuf {
    env::temp_dir().join("stickers-demo.log")
}

// The TUI owns the terminal, so logs go to a file.
fn init_logging() {
    let Ok(log_file) = fs::File::create(log_path()) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stickers=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn load_theme(path: &str) -> Result<Theme, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    Theme::from_json(&text).map_err(|e| format!("{path}: {e}"))
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut theme = Theme::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--theme" if i + 1 < args.len() => {
                theme = match load_theme(&args[i + 1]) {
                    Ok(t) => t,
                    Err(e) => {
                        eprintln!("{e}");
                        process::exit(2);
                    }
                };
                i += 2;
                continue;
            }
            other => {
                eprintln!("unknown argument: {other}");
                print_help();
                process::exit(2);
            }
        }
    }

    init_logging();
    if let Err(e) = Demo::new(theme.clone()) {
        eprintln!("failed to build demo: {e}");
        process::exit(2);
    }
    let _ = THEME.set(theme);
    info!("starting demo");

    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = match builder.build() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("failed to build program: {e:?}");
            process::exit(2);
        }
    };
    if let Err(e) = program.run().await {
        eprintln!("program error: {e:?}");
        process::exit(2);
    }
}
