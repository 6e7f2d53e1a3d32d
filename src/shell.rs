//! Interactive host for the routed screens
//!
//! Exactly one screen is mounted at a time. Every input line is either a
//! shell command (`:go`, `:help`, ...) or an action on the mounted screen;
//! after it runs, fresh notifications are printed and the screen re-rendered.

use crate::api::ResumeService;
use crate::browser::{open_in_browser, LinkOpener};
use crate::config::Config;
use crate::error::{PortalError, Result};
use crate::notify::{NotificationCenter, Notifier, ToastBoard};
use crate::output::formatter::ConsoleFormatter;
use crate::output::progress::{with_spinner, SEARCHING, UPLOADING};
use crate::router::Route;
use crate::screens::Screen;
use log::debug;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  :go <path>     switch screen (/, /submit, /search)
  :submit        go to the submit screen
  :search        go to the search screen
  :notices       show notifications that have not been dismissed
  :help          show this help
  :quit          exit
Submit screen:
  <path> | :file <path>   choose the PDF to upload
  :upload                 upload the chosen file
Search screen:
  <query>        search (Enter)
  :again         run the current query again
  :open <n>      open the download link of result n
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Go(&'a str),
    Help,
    Notices,
    Quit,
    File(&'a str),
    Upload,
    Again,
    Open(&'a str),
    Text(&'a str),
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Input::Text(line);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "go" => Input::Go(arg),
        "submit" => Input::Go("/submit"),
        "search" => Input::Go("/search"),
        "help" | "h" => Input::Help,
        "notices" => Input::Notices,
        "quit" | "q" | "exit" => Input::Quit,
        "file" => Input::File(arg),
        "upload" => Input::Upload,
        "again" => Input::Again,
        "open" => Input::Open(arg),
        other => Input::Unknown(other),
    }
}

pub struct Shell<W: Write> {
    service: Arc<dyn ResumeService>,
    notifier: Notifier,
    center: NotificationCenter,
    toasts: ToastBoard,
    screen: Screen,
    console: ConsoleFormatter,
    show_spinner: bool,
    open_link: LinkOpener,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(service: Arc<dyn ResumeService>, config: &Config, start: Route, out: W) -> Self {
        let (notifier, center) = NotificationCenter::channel();
        let screen = Screen::mount(start, service.clone(), notifier.clone());

        Self {
            service,
            notifier,
            center,
            toasts: ToastBoard::new(config.notifications.auto_close_ms),
            screen,
            console: ConsoleFormatter::new(config.output.color_output),
            show_spinner: config.output.show_spinner,
            open_link: open_in_browser,
            out,
        }
    }

    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.open_link = opener;
        self
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Mount a fresh screen for `route`; the old screen and its state are dropped.
    pub fn navigate(&mut self, route: Route) {
        debug!("Navigating to {}", route);
        self.screen = Screen::mount(route, self.service.clone(), self.notifier.clone());
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<ShellFlow> {
        match parse_input(line) {
            Input::Quit => return Ok(ShellFlow::Exit),
            Input::Help => {
                write!(self.out, "{}", HELP)?;
                return Ok(ShellFlow::Continue);
            }
            Input::Notices => {
                self.flush_notifications()?;
                self.toasts.prune(chrono::Local::now());
                if self.toasts.visible().is_empty() {
                    writeln!(self.out, "No notifications")?;
                }
                for toast in self.toasts.visible() {
                    writeln!(self.out, "{}", self.console.format_notification(toast))?;
                }
                return Ok(ShellFlow::Continue);
            }
            Input::Go(path) => match Route::resolve(path) {
                Ok(route) => self.navigate(route),
                Err(e) => self.notifier.error(e.to_string()),
            },
            Input::Unknown(name) => {
                self.notifier.error(format!("Unknown command :{} (try :help)", name));
            }
            action => self.dispatch(action).await,
        }

        self.flush_notifications()?;
        self.render()?;
        Ok(ShellFlow::Continue)
    }

    async fn dispatch(&mut self, input: Input<'_>) {
        let show_spinner = self.show_spinner;
        let open_link = self.open_link;

        match (&mut self.screen, input) {
            (Screen::Submit(screen), Input::File(path)) => {
                // A rejected pick is already posted as a notification.
                let _ = screen.select_file(Path::new(path));
            }
            (Screen::Submit(screen), Input::Text(line)) => {
                let path = line.trim();
                if !path.is_empty() {
                    // Same as :file.
                    let _ = screen.select_file(Path::new(path));
                }
            }
            (Screen::Submit(screen), Input::Upload) => {
                with_spinner(show_spinner, UPLOADING, screen.submit()).await;
            }
            (Screen::Search(screen), Input::Text(line)) => {
                screen.set_query(line);
                with_spinner(show_spinner, SEARCHING, screen.search()).await;
            }
            (Screen::Search(screen), Input::Again) => {
                with_spinner(show_spinner, SEARCHING, screen.search()).await;
            }
            (Screen::Search(screen), Input::Open(arg)) => {
                let opened = arg
                    .parse::<usize>()
                    .map_err(|_| PortalError::InvalidInput(format!("Not a result number: {}", arg)))
                    .and_then(|position| screen.download_url(position))
                    .and_then(|url| open_link(&url).map(|_| url));
                match opened {
                    Ok(url) => self.notifier.success(format!("Opened {}", url)),
                    Err(e) => self.notifier.error(e.to_string()),
                }
            }
            (screen, input) => {
                let route = screen.route();
                self.notifier
                    .error(format!("{:?} is not available on {}", input, route));
            }
        }
    }

    fn flush_notifications(&mut self) -> Result<()> {
        for notification in self.center.drain() {
            writeln!(self.out, "{}", self.console.format_notification(&notification))?;
            self.toasts.show(notification);
        }
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        let rendered = match &self.screen {
            Screen::Submit(screen) => self.console.format_submit(&screen.view()),
            Screen::Search(screen) => self.console.format_search_view(&screen.view()),
        };
        write!(self.out, "{}", rendered)?;
        Ok(())
    }

    /// Read lines until EOF or `:quit`.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        self.render()?;

        loop {
            write!(self.out, "{}> ", self.route())?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.handle_line(&line).await? == ShellFlow::Exit {
                break;
            }
        }

        writeln!(self.out)?;
        Ok(())
    }
}
