//! Main application state and rendering

use crate::data::{files, CaseDifficulty, ProgressStore};
use crate::game::case::CASE_TITLE;
use crate::game::dialogue::START_CONTEXT;
use crate::game::{CasePaths, GameSession};
use crate::tui::widgets::{CaseMeter, VerdictBox};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crate::tui::{styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Application state
pub struct App {
    pub session: Option<GameSession>,
    pub paths: CasePaths,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub menu_state: ListState,
    pub input_buffer: String,
    pub input_mode: InputMode,
    pub command_history: Vec<String>,
    pub command_output: Vec<String>,
    pub pending_suspect: Option<String>,
    pub verdict: Option<Verdict>,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    NewGame,
    Playing,
    Paused,
}

/// Input mode for command prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command, // Typing a command
}

/// Outcome of the latest accusation, shown as an overlay until dismissed
#[derive(Debug, Clone)]
pub struct Verdict {
    pub correct: bool,
    pub accused: String,
    pub outcome: String,
}

impl App {
    pub fn new(paths: CasePaths) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            session: None,
            paths,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::MainMenu,
            menu_state,
            input_buffer: String::new(),
            input_mode: InputMode::Normal,
            command_history: Vec::new(),
            command_output: vec![
                "[SYSTEM] Welcome, detective. Open the case to begin.".to_string(),
            ],
            pending_suspect: None,
            verdict: None,
        }
    }

    /// Handle keyboard input
    pub fn handle_input(&mut self) -> crate::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                // Handle command input mode separately
                if self.input_mode == InputMode::Command {
                    match key.code {
                        KeyCode::Enter => {
                            self.execute_command();
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Esc => {
                            self.input_buffer.clear();
                            self.input_mode = InputMode::Normal;
                        }
                        KeyCode::Backspace => {
                            self.input_buffer.pop();
                        }
                        KeyCode::Char(c) => {
                            self.input_buffer.push(c);
                        }
                        _ => {}
                    }
                    return Ok(true);
                }

                // The verdict overlay swallows keys until dismissed
                if self.verdict.is_some() {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                        self.verdict = None;
                    }
                    return Ok(true);
                }

                // Normal mode key handling
                match key.code {
                    KeyCode::Char('q') if self.current_screen == Screen::MainMenu => {
                        self.running = false;
                        return Ok(false);
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Esc => {
                        if self.show_help {
                            self.show_help = false;
                        } else {
                            self.handle_escape();
                        }
                    }
                    KeyCode::Up => self.navigate_up(),
                    KeyCode::Down => self.navigate_down(),
                    KeyCode::Enter => self.handle_enter(),

                    // Command mode - from the case screen
                    KeyCode::Char(':') | KeyCode::Char('/') | KeyCode::Char(' ')
                        if self.current_screen == Screen::Playing
                            || self.current_screen == Screen::Paused =>
                    {
                        self.input_mode = InputMode::Command;
                        self.input_buffer.clear();
                        self.current_screen = Screen::Playing; // Unpause if paused
                    }

                    // Quick actions on the case screen
                    KeyCode::Char('o') if self.current_screen == Screen::Playing => {
                        self.run_command("story");
                    }
                    KeyCode::Char('c') if self.current_screen == Screen::Playing => {
                        self.run_command("clues");
                    }
                    KeyCode::Char('s') if self.current_screen == Screen::Playing => {
                        self.run_command("suspects");
                    }
                    KeyCode::Char('i') if self.current_screen == Screen::Playing => {
                        self.run_command("question");
                    }
                    KeyCode::Char('a') if self.current_screen == Screen::Playing => {
                        self.command_output
                            .push("[ACTION] Time to point a finger?".to_string());
                        self.command_output.push(
                            "[TIP] Type ':accuse <name>' to make your accusation".to_string(),
                        );
                    }
                    KeyCode::Char('h') if self.current_screen == Screen::Playing => {
                        self.run_command("help");
                    }
                    _ => {}
                }
            }
        }
        Ok(true)
    }

    /// Execute a typed command
    fn execute_command(&mut self) {
        let cmd = self.input_buffer.trim().to_string();
        self.command_history.push(self.input_buffer.clone());
        self.input_buffer.clear();
        self.run_command(&cmd);
    }

    /// Run a command and append its output to the terminal
    fn run_command(&mut self, cmd: &str) {
        let output = self.process_command(cmd);
        for line in output {
            self.command_output.push(line);
        }

        // Keep output buffer manageable
        while self.command_output.len() > 200 {
            self.command_output.remove(0);
        }
    }

    /// Process a command and return output lines
    fn process_command(&mut self, cmd: &str) -> Vec<String> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        if parts.is_empty() {
            return vec![];
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "?" => vec![
                "╔═══════════════════════════════════════════════════════╗".to_string(),
                "║               DETECTIVE'S NOTEBOOK                    ║".to_string(),
                "╠═══════════════════════════════════════════════════════╣".to_string(),
                "║  story             - Read the case and the roster     ║".to_string(),
                "║  clues             - View the clue sheet              ║".to_string(),
                "║  suspects          - List suspects and progress       ║".to_string(),
                "║  question <name>   - See what you can ask someone     ║".to_string(),
                "║  ask <number>      - Put a question to them           ║".to_string(),
                "║  accuse <name>     - Name the culprit (choose well)   ║".to_string(),
                "║  status            - Where the investigation stands   ║".to_string(),
                "║  clear             - Clear the terminal               ║".to_string(),
                "║  menu              - Close the case and go back       ║".to_string(),
                "╚═══════════════════════════════════════════════════════╝".to_string(),
            ],

            "clear" | "cls" => {
                self.command_output.clear();
                vec!["[SYSTEM] Terminal cleared.".to_string()]
            }

            "story" | "case" => {
                let Some(session) = self.session.as_ref() else {
                    return vec!["[ERROR] No case is open.".to_string()];
                };
                let mut output =
                    vec!["[ACTION] You open the case file.".to_string(), String::new()];
                output.extend(session.case_information().lines().map(String::from));
                output
            }

            "clues" => self.show_clues(),

            "suspects" => self.show_suspects(),

            "question" => {
                if parts.len() < 2 {
                    let mut output =
                        vec!["[INTERVIEW] Who would you like to question?".to_string()];
                    if let Some(session) = self.session.as_ref() {
                        for suspect in session.suspects() {
                            output.push(format!("  - {}", suspect.name()));
                        }
                    }
                    output
                        .push("[TIP] Type 'question <name>' to sit down with someone".to_string());
                    return output;
                }
                self.show_questions(parts[1])
            }

            "ask" => {
                if parts.len() < 2 {
                    return vec![
                        "[TIP] Usage: ask <number> - pick a suspect first with 'question <name>'"
                            .to_string(),
                    ];
                }
                self.ask_pending(parts[1])
            }

            "accuse" => {
                if parts.len() < 2 {
                    return vec![
                        "[TIP] Usage: accuse <name>".to_string(),
                        "[TIP] One shot at glory. Make it count.".to_string(),
                    ];
                }
                let accused = parts[1..].join(" ");
                self.accuse(&accused)
            }

            "status" => self.show_status(),

            "menu" | "exit" | "quit" => {
                self.session = None;
                self.pending_suspect = None;
                self.current_screen = Screen::MainMenu;
                self.menu_state.select(Some(0));
                vec!["[SYSTEM] Case set aside. The scones remain at large.".to_string()]
            }

            other => vec![format!(
                "[ERROR] Unknown command: '{other}'. Type 'help' for the notebook."
            )],
        }
    }

    /// The clue sheet. Each clue shown is also written to the
    /// investigation log, one entry per clue.
    fn show_clues(&mut self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        if session.clues().is_empty() {
            return vec!["[CLUE] The clue sheet is empty. Odd.".to_string()];
        }

        let mut output = vec!["[CLUE] Clues discovered:".to_string()];
        for clue in session.clues() {
            let detail = clue.detailed_description();
            output.push(format!("  - {detail}"));
            files::append_investigation_log(
                &self.paths.investigation_log,
                &format!(
                    "[{}] Clue discovered: {detail}",
                    Local::now().format("%Y-%m-%d %H:%M:%S")
                ),
            );
        }
        output
    }

    /// The roster with interrogation marks. The marks come from the
    /// store, the only place the questioned flag lives.
    fn show_suspects(&mut self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        let mut output = vec!["[SYSTEM] The suspects:".to_string()];
        for suspect in session.suspects() {
            let mark = if session.is_questioned(suspect.name()) {
                "questioned"
            } else {
                "not yet questioned"
            };
            output.push(format!("  - {:<8} ({mark})", suspect.name()));
        }
        output.push("[TIP] Type 'question <name>' to start an interview".to_string());
        output
    }

    /// Lists a suspect's opening questions and remembers who is being
    /// interviewed for the follow-up `ask <n>`.
    fn show_questions(&mut self, name: &str) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        // Resolve the typed name to the cast's spelling.
        let Some(suspect) = session
            .suspects()
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
        else {
            return vec!["[ERROR] No such suspect found.".to_string()];
        };

        let canonical = suspect.name().to_string();
        let options = suspect.options_for(START_CONTEXT);
        if options.is_empty() {
            self.pending_suspect = None;
            return vec![format!("[INTERVIEW] {canonical} has nothing to say.")];
        }

        let mut output = vec![format!("[INTERVIEW] You sit down with {canonical}.")];
        for (i, entry) in options.iter().enumerate() {
            output.push(format!("  {}. {}", i + 1, entry.question));
        }
        output.push(format!("[TIP] Type 'ask <number>' to question {canonical}"));
        self.pending_suspect = Some(canonical);
        output
    }

    /// Puts the selected question to the pending suspect.
    fn ask_pending(&mut self, index: &str) -> Vec<String> {
        let Some(name) = self.pending_suspect.clone() else {
            return vec!["[TIP] Pick a suspect first with 'question <name>'".to_string()];
        };
        let Some(session) = self.session.as_mut() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        let options = session
            .suspect(&name)
            .map(|s| s.options_for(START_CONTEXT).to_vec())
            .unwrap_or_default();

        let choice = match index.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => n - 1,
            _ => {
                return vec![format!(
                    "[TIP] Choose a question between 1 and {}",
                    options.len()
                )]
            }
        };

        let question = options[choice].question.clone();
        let answer = session.ask_question(&name, START_CONTEXT, &question);

        vec![
            format!("[INTERVIEW] Questioning {name}"),
            format!("You: \"{question}\""),
            format!("{name}: \"{answer}\""),
        ]
    }

    /// Evaluates an accusation, raises the verdict overlay, and logs the
    /// outcome.
    fn accuse(&mut self, accused: &str) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        let outcome = session.make_accusation(accused);
        let correct = outcome.starts_with("Correct!");

        files::append_investigation_log(
            &self.paths.investigation_log,
            &format!(
                "[{}] Accusation made on: {accused}. Outcome: {outcome}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
        );

        self.verdict = Some(Verdict {
            correct,
            accused: accused.to_string(),
            outcome: outcome.clone(),
        });

        vec![
            format!("[ACTION] You accuse {accused}."),
            format!("[VERDICT] {outcome}"),
        ]
    }

    fn show_status(&mut self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return vec!["[ERROR] No case is open.".to_string()];
        };

        let total = session.suspects().len();
        let questioned = session
            .suspects()
            .iter()
            .filter(|s| session.is_questioned(s.name()))
            .count();

        vec![
            "┌───────────────────────────────────────────┐".to_string(),
            "│                CASE STATUS                │".to_string(),
            "├───────────────────────────────────────────┤".to_string(),
            format!("│ Case: {:<35} │", CASE_TITLE),
            format!("│ Difficulty: {:<29} │", session.difficulty().to_string()),
            format!("│ Clues on file: {:<26} │", session.clues().len()),
            format!(
                "│ Suspects questioned: {:<20} │",
                format!("{questioned}/{total}")
            ),
            "└───────────────────────────────────────────┘".to_string(),
        ]
    }

    fn handle_escape(&mut self) {
        match self.current_screen {
            Screen::Playing => self.current_screen = Screen::Paused,
            Screen::Paused => self.current_screen = Screen::Playing,
            Screen::NewGame => {
                self.current_screen = Screen::MainMenu;
                self.menu_state.select(Some(0));
            }
            _ => {}
        }
    }

    fn navigate_up(&mut self) {
        let i = self.menu_state.selected().unwrap_or(0);
        if i > 0 {
            self.menu_state.select(Some(i - 1));
        }
    }

    fn navigate_down(&mut self) {
        let max = match self.current_screen {
            Screen::MainMenu => 2,
            Screen::NewGame => 2,
            _ => 0,
        };
        let i = self.menu_state.selected().unwrap_or(0);
        if i < max {
            self.menu_state.select(Some(i + 1));
        }
    }

    fn handle_enter(&mut self) {
        match self.current_screen {
            Screen::MainMenu => match self.menu_state.selected() {
                Some(0) => {
                    self.current_screen = Screen::NewGame;
                    self.menu_state.select(Some(1)); // Medium is the default
                }
                Some(1) => self.show_help = true,
                Some(2) => self.running = false,
                _ => {}
            },
            Screen::NewGame => {
                let difficulty = match self.menu_state.selected() {
                    Some(0) => CaseDifficulty::Easy,
                    Some(2) => CaseDifficulty::Hard,
                    _ => CaseDifficulty::Medium,
                };
                self.open_case(difficulty);
            }
            _ => {}
        }
    }

    /// Opens the case: store first, then the session, then the briefing.
    ///
    /// A store that cannot be opened on disk degrades to an in-memory one
    /// so the game never refuses to start over persistence.
    fn open_case(&mut self, difficulty: CaseDifficulty) {
        let store = match ProgressStore::open(&self.paths.database) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(
                    "could not open progress store {}: {err}",
                    self.paths.database.display()
                );
                match ProgressStore::open_in_memory() {
                    Ok(store) => {
                        self.command_output.push(
                            "[WARN] Progress store unavailable; this sitting will not be remembered."
                                .to_string(),
                        );
                        store
                    }
                    Err(err) => {
                        self.command_output
                            .push(format!("[ERROR] Could not open a progress store: {err}"));
                        return;
                    }
                }
            }
        };

        let session = GameSession::open(&self.paths, difficulty, store);
        session.record_player("Detective", "investigating");

        self.current_screen = Screen::Playing;
        self.menu_state.select(Some(0));
        self.input_mode = InputMode::Normal;
        self.pending_suspect = None;
        self.verdict = None;
        self.command_output.clear();

        self.command_output
            .push("═══════════════════════════════════════════════════════".to_string());
        self.command_output
            .push(format!("[SYSTEM] PANTRY DETECTIVE v{}", crate::VERSION));
        self.command_output
            .push(format!("[SYSTEM] Case opened: {CASE_TITLE}"));
        self.command_output
            .push(format!("[SYSTEM] Difficulty: {difficulty}"));
        self.command_output
            .push("═══════════════════════════════════════════════════════".to_string());
        self.command_output.push(String::new());
        for line in session.case_information().lines() {
            self.command_output.push(line.to_string());
        }
        self.command_output.push(String::new());
        self.command_output
            .push("[TIP] Press SPACE, : or / to enter commands".to_string());
        self.command_output.push(
            "[TIP] Quick keys: o=story, c=clues, s=suspects, i=question, a=accuse".to_string(),
        );
        self.command_output.push(String::new());

        self.session = Some(session);
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::MainMenu => self.render_main_menu(frame),
            Screen::NewGame => self.render_new_game(frame),
            Screen::Playing | Screen::Paused => self.render_game(frame),
        }

        // Overlays, innermost last
        if self.current_screen == Screen::Paused {
            self.render_pause_overlay(frame);
        }
        if let Some(verdict) = self.verdict.clone() {
            self.render_verdict_overlay(frame, &verdict);
        }
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_main_menu(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            area,
        );

        let menu_height: u16 = 7;

        // For small terminals, skip the big logo
        if area.height < 24 {
            let title = Paragraph::new("═══ PANTRY DETECTIVE ═══")
                .style(
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);
            frame.render_widget(title, Rect::new(0, 1, area.width, 1));

            let subtitle = Paragraph::new(CASE_TITLE)
                .style(Style::default().fg(self.theme.header))
                .alignment(Alignment::Center);
            frame.render_widget(subtitle, Rect::new(0, 2, area.width, 1));

            let menu_y = (area.height.saturating_sub(menu_height)) / 2;
            let menu_area = Rect::new(
                area.width / 4,
                menu_y.max(4),
                area.width / 2,
                menu_height.min(area.height.saturating_sub(menu_y).saturating_sub(2)),
            );
            self.render_menu_list(frame, menu_area);

            if area.height > 1 {
                let footer = Paragraph::new("Press ? for help | q to quit")
                    .style(Style::default().fg(self.theme.border))
                    .alignment(Alignment::Center);
                frame.render_widget(
                    footer,
                    Rect::new(0, area.height.saturating_sub(1), area.width, 1),
                );
            }
            return;
        }

        // Full logo mode
        let logo_height = LOGO.lines().count() as u16;
        let total_height = logo_height + menu_height + 2;
        let start_y = area.height.saturating_sub(total_height) / 2;

        let logo_area = Rect::new(
            area.x,
            start_y,
            area.width,
            logo_height.min(area.height.saturating_sub(start_y)),
        );
        let logo = Paragraph::new(LOGO)
            .style(Style::default().fg(self.theme.accent))
            .alignment(Alignment::Center);
        frame.render_widget(logo, logo_area);

        let menu_y = start_y + logo_height + 1;
        let menu_area = Rect::new(
            area.width / 4,
            menu_y.min(area.height.saturating_sub(menu_height).saturating_sub(1)),
            area.width / 2,
            menu_height.min(area.height.saturating_sub(menu_y).saturating_sub(1)),
        );
        self.render_menu_list(frame, menu_area);

        if area.height > 1 {
            let footer = Paragraph::new("Press ? for help | q to quit")
                .style(Style::default().fg(self.theme.border))
                .alignment(Alignment::Center);
            frame.render_widget(
                footer,
                Rect::new(0, area.height.saturating_sub(1), area.width, 1),
            );
        }
    }

    fn render_menu_list(&mut self, frame: &mut Frame, area: Rect) {
        let menu_items = vec![
            ListItem::new("  ▶ Open Case"),
            ListItem::new("  ▶ Help"),
            ListItem::new("  ▶ Quit"),
        ];

        let menu = List::new(menu_items)
            .block(styled_block("Main Menu", &self.theme))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("→ ");

        frame.render_stateful_widget(menu, area, &mut self.menu_state);
    }

    fn render_new_game(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(11),
                Constraint::Length(2),
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "HOW HARD SHOULD THE TRUTH BE?",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border)),
        );
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = [
            CaseDifficulty::Easy,
            CaseDifficulty::Medium,
            CaseDifficulty::Hard,
        ]
        .iter()
        .map(|difficulty| {
            ListItem::new(vec![
                Line::from(""),
                Line::from(vec![Span::styled(
                    format!("  {difficulty}"),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from(vec![Span::styled(
                    format!("      {}", difficulty.description()),
                    Style::default().fg(Color::DarkGray),
                )]),
            ])
        })
        .collect();

        let list = List::new(items)
            .block(styled_block("Difficulty", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.menu_state);

        let footer = Paragraph::new("↑/↓ to select, Enter to open the case, Esc to go back")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_game(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_side_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);
        self.render_case_notes(frame, main_layout[1]);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Min(20),
                Constraint::Length(26),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            );
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(CASE_TITLE)
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            );
        frame.render_widget(title, header_layout[1]);

        let (difficulty, clue_count) = match &self.session {
            Some(session) => (session.difficulty().to_string(), session.clues().len()),
            None => ("-".to_string(), 0),
        };
        let info = Paragraph::new(format!(" {difficulty} | Clues: {clue_count} "))
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border)),
            );
        frame.render_widget(info, header_layout[2]);
    }

    fn render_side_panel(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Progress meter
                Constraint::Length(6), // Suspects
                Constraint::Min(8),    // Actions
            ])
            .split(area);

        let (questioned, total) = self.questioned_counts();

        let meter_block = styled_block("Progress", &self.theme);
        let meter_area = meter_block.inner(chunks[0]);
        frame.render_widget(meter_block, chunks[0]);
        frame.render_widget(
            CaseMeter::new("Questioned", questioned, total).color(self.theme.success),
            meter_area,
        );

        let suspect_lines: Vec<Line> = match &self.session {
            Some(session) => session
                .suspects()
                .iter()
                .map(|suspect| {
                    let questioned = session.is_questioned(suspect.name());
                    let (mark, color) = if questioned {
                        ("✓", self.theme.success)
                    } else {
                        ("·", self.theme.border)
                    };
                    Line::from(vec![
                        Span::styled(format!(" {mark} "), Style::default().fg(color)),
                        Span::raw(suspect.name().to_string()),
                    ])
                })
                .collect(),
            None => vec![Line::from(" (no case open)")],
        };
        let suspects = Paragraph::new(suspect_lines).block(styled_block("Suspects", &self.theme));
        frame.render_widget(suspects, chunks[1]);

        let actions = vec![
            ListItem::new("  [O] Read the Story"),
            ListItem::new("  [C] View Clues"),
            ListItem::new("  [S] List Suspects"),
            ListItem::new("  [I] Question Suspect"),
            ListItem::new("  [A] Make Accusation"),
            ListItem::new("  ───────────────────"),
            ListItem::new("  [Esc] Pause"),
            ListItem::new("  [?] Help"),
        ];
        let action_list = List::new(actions).block(styled_block("Actions", &self.theme));
        frame.render_widget(action_list, chunks[2]);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Terminal output
                Constraint::Length(3), // Input line
            ])
            .split(area);

        let visible_lines = chunks[0].height.saturating_sub(2) as usize;
        let start = self.command_output.len().saturating_sub(visible_lines);
        let output_lines: Vec<Line> = self.command_output[start..]
            .iter()
            .map(|line| {
                // Color code different kinds of output
                let (color, bold) = if line.starts_with("[ERROR]") {
                    (Color::Red, true)
                } else if line.starts_with("[WARN]") {
                    (Color::Yellow, true)
                } else if line.starts_with("[VERDICT]") {
                    (Color::Magenta, true)
                } else if line.starts_with("[SYSTEM]") {
                    (Color::Cyan, false)
                } else if line.starts_with("[CLUE]") {
                    (Color::Green, false)
                } else if line.starts_with("[INTERVIEW]") {
                    (Color::Cyan, true)
                } else if line.starts_with("[ACTION]") {
                    (Color::White, true)
                } else if line.starts_with("[TIP]") {
                    (Color::DarkGray, false)
                } else if line.starts_with("You:") {
                    (Color::White, true)
                } else if line.starts_with("Nomsa:")
                    || line.starts_with("Sipho:")
                    || line.starts_with("Thando:")
                {
                    (Color::Yellow, false)
                } else if line.starts_with('─')
                    || line.starts_with('═')
                    || line.starts_with('╔')
                    || line.starts_with('║')
                    || line.starts_with('╚')
                    || line.starts_with('┌')
                    || line.starts_with('│')
                    || line.starts_with('└')
                    || line.starts_with('├')
                {
                    (Color::DarkGray, false)
                } else {
                    (Color::White, false)
                };

                let style = if bold {
                    Style::default().fg(color).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(color)
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect();

        let terminal = Paragraph::new(output_lines)
            .block(styled_block("Terminal", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(terminal, chunks[0]);

        let prompt = if self.input_mode == InputMode::Command {
            format!("detective@pantry:~$ {}_", self.input_buffer)
        } else {
            "detective@pantry:~$ [Press : or / to type a command]".to_string()
        };
        let input_color = if self.input_mode == InputMode::Command {
            Color::Green
        } else {
            Color::DarkGray
        };

        let input = Paragraph::new(prompt)
            .style(Style::default().fg(input_color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(
                        if self.input_mode == InputMode::Command {
                            Color::Green
                        } else {
                            self.theme.border
                        },
                    ))
                    .title(" Command "),
            );
        frame.render_widget(input, chunks[1]);
    }

    fn render_case_notes(&self, frame: &mut Frame, area: Rect) {
        let (questioned, total) = self.questioned_counts();
        let clue_count = self
            .session
            .as_ref()
            .map(|session| session.clues().len())
            .unwrap_or(0);

        let text = vec![
            Line::from(vec![
                Span::raw("Clues on file: "),
                Span::styled(format!("{clue_count}"), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::raw("Suspects questioned: "),
                Span::styled(
                    format!("{questioned}/{total}"),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Question everyone before you accuse anyone.",
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        let notes = Paragraph::new(text)
            .block(styled_block("Investigation", &self.theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(notes, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let (questioned, total) = self.questioned_counts();
        let status_text =
            format!(" {CASE_TITLE} | Questioned: {questioned}/{total} | Press ? for help ");

        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_pause_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_width = 40.min(area.width.saturating_sub(2));
        let popup_height = 9.min(area.height.saturating_sub(2));
        let popup_area = Rect::new(
            (area.width.saturating_sub(popup_width)) / 2,
            (area.height.saturating_sub(popup_height)) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let pause_text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("The scones can wait."),
            Line::from(""),
            Line::from("Press ESC to resume"),
        ];

        let pause = Paragraph::new(pause_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Tea Break "),
            );
        frame.render_widget(pause, popup_area);
    }

    fn render_verdict_overlay(&self, frame: &mut Frame, verdict: &Verdict) {
        let area = frame.area();
        let popup_width = 56.min(area.width.saturating_sub(2));
        let popup_height = 10.min(area.height.saturating_sub(2));
        let popup_area = Rect::new(
            (area.width.saturating_sub(popup_width)) / 2,
            (area.height.saturating_sub(popup_height)) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let (title, color) = if verdict.correct {
            ("CASE CLOSED", self.theme.success)
        } else {
            ("NOT GUILTY", self.theme.alert)
        };

        let mut content = vec![String::new(), format!("The accused: {}", verdict.accused)];
        content.push(String::new());
        content.extend(wrap_text(
            &verdict.outcome,
            popup_width.saturating_sub(4) as usize,
        ));
        content.push(String::new());
        content.push("Press Esc to continue".to_string());

        frame.render_widget(
            VerdictBox::new(title).content(content).border_color(color),
            popup_area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_width = 67.min(area.width.saturating_sub(4));
        let popup_height = 24.min(area.height.saturating_sub(4));
        let popup_area = Rect::new(
            (area.width.saturating_sub(popup_width)) / 2,
            (area.height.saturating_sub(popup_height)) / 2,
            popup_width,
            popup_height,
        );

        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent)),
            );
        frame.render_widget(help, popup_area);
    }

    /// Questioned suspect counts, read back from the store.
    fn questioned_counts(&self) -> (usize, usize) {
        match &self.session {
            Some(session) => {
                let total = session.suspects().len();
                let questioned = session
                    .suspects()
                    .iter()
                    .filter(|s| session.is_questioned(s.name()))
                    .count();
                (questioned, total)
            }
            None => (0, 0),
        }
    }
}

/// Greedy word-wrap for overlay content.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_session() -> App {
        let dir = tempfile::tempdir().unwrap();
        let paths = CasePaths {
            case_file: dir.path().join("case.txt"),
            clues_file: dir.path().join("clues.txt"),
            database: dir.path().join("progress.db"),
            investigation_log: dir.path().join("log.txt"),
        };
        std::fs::write(&paths.case_file, "The scones are gone.").unwrap();
        std::fs::write(&paths.clues_file, "Key found|Look under the mat|Sipho").unwrap();

        let mut app = App::new(paths);
        app.open_case(CaseDifficulty::Medium);
        // Leak the tempdir so the paths stay valid for the test body.
        std::mem::forget(dir);
        app
    }

    #[test]
    fn opening_a_case_moves_to_the_playing_screen() {
        let app = app_with_session();
        assert_eq!(app.current_screen, Screen::Playing);
        assert!(app.session.is_some());
        // The briefing includes the roster.
        assert!(app
            .command_output
            .iter()
            .any(|line| line.contains("- Nomsa")));
    }

    #[test]
    fn question_then_ask_runs_a_full_interview() {
        let mut app = app_with_session();

        let listing = app.process_command("question nomsa");
        assert!(listing.iter().any(|line| line.contains("1.")));
        assert_eq!(app.pending_suspect.as_deref(), Some("Nomsa"));

        let exchange = app.process_command("ask 1");
        assert!(exchange.iter().any(|line| line.starts_with("You:")));
        assert!(exchange.iter().any(|line| line.starts_with("Nomsa:")));

        let session = app.session.as_ref().unwrap();
        assert!(session.is_questioned("Nomsa"));
    }

    #[test]
    fn questioning_an_unknown_name_is_a_soft_failure() {
        let mut app = app_with_session();
        let output = app.process_command("question gogo");
        assert!(output
            .iter()
            .any(|line| line.contains("No such suspect found.")));
        assert!(app.pending_suspect.is_none());
    }

    #[test]
    fn ask_without_a_pending_suspect_gives_a_tip() {
        let mut app = app_with_session();
        let output = app.process_command("ask 1");
        assert!(output.iter().any(|line| line.starts_with("[TIP]")));
    }

    #[test]
    fn ask_out_of_range_gives_a_tip() {
        let mut app = app_with_session();
        app.process_command("question sipho");
        let output = app.process_command("ask 9");
        assert!(output[0].contains("between 1 and 2"));
    }

    #[test]
    fn viewing_clues_logs_one_entry_per_clue() {
        let mut app = app_with_session();
        app.process_command("clues");

        let log = std::fs::read_to_string(&app.paths.investigation_log).unwrap();
        let entries: Vec<&str> = log.lines().collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("Clue discovered: Key found"));
    }

    #[test]
    fn accusation_logs_the_outcome_and_raises_the_verdict_overlay() {
        let mut app = app_with_session();
        let output = app.process_command("accuse sipho");

        assert!(output.iter().any(|line| line.contains("Correct!")));
        let verdict = app.verdict.as_ref().unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.accused, "sipho");

        let log = std::fs::read_to_string(&app.paths.investigation_log).unwrap();
        assert!(log.contains("Accusation made on: sipho"));
        assert!(log.contains("Outcome: Correct!"));
    }

    #[test]
    fn interviews_append_nothing_to_the_investigation_log() {
        let mut app = app_with_session();
        app.process_command("question thando");
        app.process_command("ask 2");

        assert!(!app.paths.investigation_log.exists());
    }

    #[test]
    fn unknown_commands_point_at_the_notebook() {
        let mut app = app_with_session();
        let output = app.process_command("teleport pantry");
        assert!(output[0].starts_with("[ERROR] Unknown command"));
    }

    #[test]
    fn menu_command_closes_the_session() {
        let mut app = app_with_session();
        app.run_command("menu");
        assert!(app.session.is_none());
        assert_eq!(app.current_screen, Screen::MainMenu);
    }

    #[test]
    fn wrap_text_respects_the_width() {
        let lines = wrap_text("Correct! Sipho was caught trying to steal the recipe.", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.len() <= 20));
    }
}
