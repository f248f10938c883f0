use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::api::{ApiClient, ApiError};
use crate::form::{FormField, TaskForm};
use crate::models::{PopupMode, Task, TaskCategory, TaskStatus, ViewTab};
use crate::session::Session;
use crate::store::{DragSource, TaskFilter, TaskStore};

pub struct App {
    api: ApiClient,
    rt: tokio::runtime::Runtime,
    session: Session,
    username: Option<String>,
    pub store: TaskStore,
    pub tab: ViewTab,
    pub filter: TaskFilter,
    pub searching: bool,
    pub expanded: [bool; 3],
    pub column: usize,
    pub cursor: usize,
    pub drag: Option<DragSource>,
    pub popup: PopupMode,
    pub form: Option<TaskForm>,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: ApiClient, session: Session) -> Result<Self> {
        let rt = tokio::runtime::Runtime::new()?;
        let username = session.username();
        let mut app = App {
            api,
            rt,
            session,
            username,
            store: TaskStore::new(),
            tab: ViewTab::List,
            filter: TaskFilter::default(),
            searching: false,
            expanded: [true; 3],
            column: 0,
            cursor: 0,
            drag: None,
            popup: PopupMode::None,
            form: None,
            message: None,
            should_quit: false,
        };
        app.refresh();
        Ok(app)
    }

    pub fn refresh(&mut self) {
        let result = self.rt.block_on(self.api.list_tasks(None));
        match result {
            Ok(tasks) => self.store.replace(tasks),
            Err(e) => self.message = Some(render_error(&e)),
        }
        self.clamp_cursor();
    }

    /// Clear the stored token and leave, the terminal analog of the sign-out
    /// redirect.
    pub fn logout(&mut self) {
        match self.session.clear() {
            Ok(()) => self.should_quit = true,
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn column_status(&self) -> TaskStatus {
        TaskStatus::ALL[self.column]
    }

    fn column_len(&self) -> usize {
        self.store.by_status(self.column_status(), &self.filter).len()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.store
            .by_status(self.column_status(), &self.filter)
            .get(self.cursor)
            .copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.column_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn next_column(&mut self) {
        if self.column < TaskStatus::ALL.len() - 1 {
            self.column += 1;
            self.cursor = 0;
        }
    }

    pub fn previous_column(&mut self) {
        if self.column > 0 {
            self.column -= 1;
            self.cursor = 0;
        }
    }

    pub fn next_item(&mut self) {
        let len = self.column_len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    pub fn previous_item(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded[self.column] = !self.expanded[self.column];
    }

    pub fn cycle_category_filter(&mut self) {
        self.filter.category = match self.filter.category {
            None => Some(TaskCategory::Work),
            Some(TaskCategory::Work) => Some(TaskCategory::Personal),
            Some(TaskCategory::Personal) => None,
        };
        self.clamp_cursor();
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TaskForm::create());
        self.popup = PopupMode::TaskForm;
    }

    pub fn open_edit_form(&mut self) {
        let selected = self.selected_task().cloned();
        if let Some(task) = selected {
            self.form = Some(TaskForm::edit(&task));
            self.popup = PopupMode::TaskForm;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.popup = PopupMode::None;
    }

    /// Ids the next bulk action applies to: the multi-selection when one
    /// exists, otherwise the task under the cursor. Taking the selection
    /// clears it, so a bulk action consumes it either way.
    fn action_targets(&mut self) -> Vec<String> {
        if self.store.selection().is_empty() {
            self.selected_task()
                .map(|t| vec![t.id.clone()])
                .unwrap_or_default()
        } else {
            self.store.take_selection()
        }
    }

    fn has_action_target(&self) -> bool {
        !self.store.selection().is_empty() || self.selected_task().is_some()
    }

    pub fn toggle_select(&mut self) {
        let id = self.selected_task().map(|t| t.id.clone());
        if let Some(id) = id {
            self.store.toggle_selected(&id);
        }
    }

    /// Board interaction: first Enter picks the card up (carrying its id and
    /// current status), second Enter drops it on the selected column.
    pub fn board_enter(&mut self) {
        match self.drag.take() {
            None => {
                let picked = self
                    .selected_task()
                    .map(|t| (t.id.clone(), t.task_status));
                if let Some((id, status)) = picked {
                    self.drag = Some(DragSource { id, status });
                }
            }
            Some(drag) => {
                let target = self.column_status();
                if !drag.drops_on(target) {
                    return;
                }
                let result = self
                    .rt
                    .block_on(self.api.update_task_status(&drag.id, target));
                match result {
                    Ok(()) => {
                        self.store.apply_status(&drag.id, target);
                        self.message = Some(format!("moved to {}", target));
                    }
                    Err(e) => self.message = Some(render_error(&e)),
                }
            }
        }
        self.clamp_cursor();
    }

    pub fn apply_status_to_targets(&mut self, status: TaskStatus) {
        let ids = self.action_targets();
        for id in &ids {
            let result = self.rt.block_on(self.api.update_task_status(id, status));
            match result {
                Ok(()) => {
                    self.store.apply_status(id, status);
                }
                Err(e) => {
                    self.message = Some(render_error(&e));
                    break;
                }
            }
        }
        self.popup = PopupMode::None;
        self.clamp_cursor();
    }

    pub fn delete_targets(&mut self) {
        let ids = self.action_targets();
        let mut deleted = 0usize;
        for id in &ids {
            let result = self.rt.block_on(self.api.delete_task(id));
            match result {
                Ok(()) => {
                    self.store.remove(id);
                    deleted += 1;
                }
                Err(e) => {
                    self.message = Some(render_error(&e));
                    break;
                }
            }
        }
        if deleted > 0 && self.message.is_none() {
            self.message = Some(format!("deleted {} task(s)", deleted));
        }
        self.popup = PopupMode::None;
        self.clamp_cursor();
    }

    pub fn submit_form(&mut self) {
        let prepared = {
            let Some(form) = self.form.as_mut() else {
                return;
            };
            if !form.take_attachment_from_path() {
                return;
            }
            let Some(fields) = form.submit_fields() else {
                return;
            };
            form.submitting = true;
            (fields, form.attachment.clone(), form.editing_id.clone())
        };
        let (fields, attachment, editing_id) = prepared;

        let result = match &editing_id {
            Some(id) => self
                .rt
                .block_on(self.api.update_task(id, &fields, attachment)),
            None => self
                .rt
                .block_on(self.api.create_task(&fields, attachment))
                .map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.close_form();
                self.refresh();
                self.message = Some(
                    if editing_id.is_some() {
                        "task updated"
                    } else {
                        "task created"
                    }
                    .to_string(),
                );
            }
            Err(e) => {
                // Stay open for retry with the server's message.
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                    form.message = Some(render_error(&e));
                }
            }
        }
    }
}

fn render_error(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized => "session expired, please log in again".to_string(),
        other => other.to_string(),
    }
}

pub fn run_tui(api: ApiClient, session: Session) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, session)?;
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if app.popup == PopupMode::TaskForm {
                    handle_form_key(app, key.code);
                } else if app.popup == PopupMode::StatusPick {
                    match key.code {
                        KeyCode::Esc => {
                            app.store.clear_selection();
                            app.popup = PopupMode::None;
                        }
                        KeyCode::Char('1') => app.apply_status_to_targets(TaskStatus::ToDo),
                        KeyCode::Char('2') => {
                            app.apply_status_to_targets(TaskStatus::InProgress)
                        }
                        KeyCode::Char('3') => {
                            app.apply_status_to_targets(TaskStatus::Completed)
                        }
                        _ => {}
                    }
                } else if app.popup == PopupMode::ConfirmDelete {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => app.delete_targets(),
                        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                            app.store.clear_selection();
                            app.popup = PopupMode::None;
                        }
                        _ => {}
                    }
                } else if app.searching {
                    match key.code {
                        KeyCode::Esc | KeyCode::Enter => app.searching = false,
                        KeyCode::Backspace => {
                            app.filter.search.pop();
                            app.clamp_cursor();
                        }
                        KeyCode::Char(c) => {
                            app.filter.search.push(c);
                            app.clamp_cursor();
                        }
                        _ => {}
                    }
                } else {
                    handle_normal_key(app, key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_normal_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => {
            app.tab = match app.tab {
                ViewTab::List => ViewTab::Board,
                ViewTab::Board => ViewTab::List,
            };
        }
        KeyCode::Left => app.previous_column(),
        KeyCode::Right => app.next_column(),
        KeyCode::Up => app.previous_item(),
        KeyCode::Down => app.next_item(),
        KeyCode::Enter => match app.tab {
            ViewTab::Board => app.board_enter(),
            ViewTab::List => app.open_edit_form(),
        },
        KeyCode::Char('a') => app.open_create_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => {
            if app.has_action_target() {
                app.popup = PopupMode::ConfirmDelete;
            }
        }
        KeyCode::Char('s') => {
            if app.has_action_target() {
                app.popup = PopupMode::StatusPick;
            }
        }
        KeyCode::Char('x') => app.toggle_select(),
        KeyCode::Char('o') => app.toggle_expanded(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('c') => app.cycle_category_filter(),
        KeyCode::Char('/') => app.searching = true,
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Esc => {
            if app.drag.is_some() {
                app.drag = None;
            } else if app.message.is_some() {
                app.message = None;
            } else {
                app.store.clear_selection();
            }
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, code: KeyCode) {
    let submitting = app
        .form
        .as_ref()
        .map(|f| f.submitting)
        .unwrap_or(false);
    if submitting {
        return;
    }
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.focus_prev();
            }
        }
        KeyCode::Left => {
            if let Some(form) = app.form.as_mut() {
                form.cycle(-1);
            }
        }
        KeyCode::Right => {
            if let Some(form) = app.form.as_mut() {
                form.cycle(1);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.input(c);
            }
        }
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(f.area());

    let titles: Vec<Line> = ["List", "Board"].iter().cloned().map(Line::from).collect();
    let title = match &app.username {
        Some(name) => format!("TaskBuddy - {}", name),
        None => "TaskBuddy".to_string(),
    };
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .select(match app.tab {
            ViewTab::List => 0,
            ViewTab::Board => 1,
        })
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Black),
        );
    f.render_widget(tabs, chunks[0]);

    render_filter_bar(f, app, chunks[1]);

    match app.tab {
        ViewTab::List => render_list_tab(f, app, chunks[2]),
        ViewTab::Board => render_board_tab(f, app, chunks[2]),
    }

    render_footer(f, app, chunks[3]);

    match app.popup {
        PopupMode::TaskForm => render_form_popup(f, app),
        PopupMode::StatusPick => render_status_popup(f, app),
        PopupMode::ConfirmDelete => render_confirm_popup(f, app),
        PopupMode::None => {}
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let search = if app.searching {
        format!("{}_", app.filter.search)
    } else if app.filter.search.is_empty() {
        "-".to_string()
    } else {
        app.filter.search.clone()
    };
    let category = app
        .filter
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "ALL".to_string());
    let line = Line::from(vec![
        Span::raw("Search: "),
        Span::styled(search, Style::default().fg(Color::White)),
        Span::raw("   Category: "),
        Span::styled(category, Style::default().fg(Color::Cyan)),
        Span::raw(format!("   Selected: {}", app.store.selection().len())),
    ]);
    let bar = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Filter"));
    f.render_widget(bar, area);
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::ToDo => Color::Magenta,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Completed => Color::Green,
    }
}

fn group_title(app: &App, status: TaskStatus, index: usize) -> String {
    let marker = if app.expanded[index] { "v" } else { ">" };
    format!("{} {} ({})", marker, status, app.store.status_count(status))
}

fn task_row<'a>(app: &App, task: &'a Task, highlighted: bool) -> ListItem<'a> {
    let dragging = app
        .drag
        .as_ref()
        .map(|d| d.id == task.id)
        .unwrap_or(false);
    let marker = if app.store.is_selected(&task.id) {
        "[x] "
    } else {
        "[ ] "
    };

    let mut name_style = Style::default().fg(Color::White);
    if task.task_status == TaskStatus::Completed {
        name_style = name_style
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if dragging {
        name_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::DarkGray)),
        Span::styled(task.name.clone(), name_style),
        Span::styled(
            format!("  {}", task.date),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  [{}]", task.task_category),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if task.file_url.is_some() {
        spans.push(Span::styled(" [img]", Style::default().fg(Color::Green)));
    }
    if dragging {
        spans.push(Span::styled(
            " (moving)",
            Style::default().fg(Color::Yellow),
        ));
    }

    let mut item = ListItem::new(Line::from(spans));
    if highlighted && !dragging {
        item = item.style(
            Style::default()
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        );
    }
    item
}

fn render_list_tab(f: &mut Frame, app: &App, area: Rect) {
    let constraints: Vec<Constraint> = TaskStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if app.expanded[i] {
                Constraint::Min(4)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, status) in TaskStatus::ALL.iter().enumerate() {
        let selected_here = app.column == i;
        let block = Block::default()
            .title(group_title(app, *status, i))
            .borders(Borders::ALL)
            .border_style(if selected_here {
                Style::default().fg(status_color(*status))
            } else {
                Style::default()
            });

        if !app.expanded[i] {
            f.render_widget(block, chunks[i]);
            continue;
        }

        let tasks = app.store.by_status(*status, &app.filter);
        let items: Vec<ListItem> = if tasks.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "no tasks in this group",
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            tasks
                .iter()
                .enumerate()
                .map(|(row, task)| task_row(app, task, selected_here && row == app.cursor))
                .collect()
        };

        let list = List::new(items).block(block);
        f.render_widget(list, chunks[i]);
    }
}

fn render_board_tab(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, status) in TaskStatus::ALL.iter().enumerate() {
        let selected_here = app.column == i;
        let block = Block::default()
            .title(group_title(app, *status, i))
            .borders(Borders::ALL)
            .border_style(if selected_here {
                Style::default().fg(status_color(*status))
            } else {
                Style::default()
            });

        if !app.expanded[i] {
            f.render_widget(block, chunks[i]);
            continue;
        }

        let tasks = app.store.by_status(*status, &app.filter);
        let items: Vec<ListItem> = if tasks.is_empty() {
            let hint = if app.filter.search.is_empty() {
                "no tasks here"
            } else {
                "no tasks matching search"
            };
            vec![ListItem::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            tasks
                .iter()
                .enumerate()
                .map(|(row, task)| task_row(app, task, selected_here && row == app.cursor))
                .collect()
        };

        let list = List::new(items).block(block);
        f.render_widget(list, chunks[i]);
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.tab {
        ViewTab::List => {
            "a add  e/Enter edit  d delete  s status  x select  o fold  / search  c category  r refresh  L logout  Tab board  q quit"
        }
        ViewTab::Board => {
            "Enter pick up / drop  a add  e edit  d delete  s status  x select  / search  r refresh  L logout  Tab list  q quit"
        }
    };
    let mut lines = vec![Line::from(Span::styled(
        help,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(msg) = &app.message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if app.drag.is_some() {
        lines.push(Line::from(Span::styled(
            "carrying a task - move to a column and press Enter to drop, Esc to cancel",
            Style::default().fg(Color::Yellow),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_form_popup(f: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let title = if form.is_edit() {
        "Edit Task"
    } else {
        "Create Task"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in FormField::ORDER.iter().enumerate() {
        let focused = form.focus == i;
        let errored = form.is_errored(*field);

        let value = match field {
            FormField::Name => form.name.clone(),
            FormField::Description => form.description.clone(),
            FormField::Date => form.date.clone(),
            FormField::Status => form
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "<none>".to_string()),
            FormField::Category => form
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "<none>".to_string()),
            FormField::Attachment => form.attachment_path.clone(),
        };

        let label_style = if errored {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}: ", if focused { ">" } else { " " }, field.label()), label_style),
            Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
        ]));
        if errored {
            lines.push(Line::from(Span::styled(
                "    this field is mandatory",
                Style::default().fg(Color::Red),
            )));
        }
    }

    if let Some(url) = &form.existing_file_url {
        lines.push(Line::from(Span::styled(
            format!("  current attachment: {}", url),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  saving...",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(msg) = &form.message {
        lines.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "  Enter: save   Tab: next field   Left/Right: change value   Esc: cancel",
        Style::default().fg(Color::Gray),
    )));

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(content, area);
}

fn render_status_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let count = app.store.selection().len().max(1);
    let block = Block::default()
        .title(format!("Change Status ({} task(s))", count))
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));
    let content = Paragraph::new(
        "Select new status:\n\n1. TO-DO\n2. IN-PROGRESS\n3. COMPLETED\n\nPress ESC to cancel",
    )
    .block(block)
    .alignment(ratatui::layout::Alignment::Center)
    .style(Style::default().fg(Color::White));
    f.render_widget(content, area);
}

fn render_confirm_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let count = app.store.selection().len().max(1);
    let block = Block::default()
        .title("Delete Tasks")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::DarkGray));
    let content = Paragraph::new(format!(
        "Delete {} task(s) from the store?\n\nThis cannot be undone.\n\ny = delete, n/ESC = cancel",
        count
    ))
    .block(block)
    .alignment(ratatui::layout::Alignment::Center)
    .style(Style::default().fg(Color::White));
    f.render_widget(content, area);
}

// Helper function to create centered rectangles for popups
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
