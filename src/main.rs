use iced::widget::image::Handle;
use iced::widget::text_editor;
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, error, info, warn};

mod cover;
mod error;
mod logging;
mod settings;
mod state;
mod ui;

use error::AppError;
use settings::Settings;
use state::book_list::BookList;
use state::data::{BookId, SortStyle};
use state::library::Library;
use state::listing::{Row, RowPath};
use state::store::{seed_samples_if_empty, BookStore, MemoryStore};
use ui::detail_view::DetailView;
use ui::new_book::NewBookForm;

/// Whatever store the app was started with (SQLite catalog or in-memory)
type Store = Box<dyn BookStore + Send>;

/// Which screen is showing
enum Screen {
    Library,
    Detail(DetailView),
    NewBook(NewBookForm),
}

/// Main application state
pub struct ReadMe {
    /// The injected book store
    store: Store,
    /// Grouped, sorted rows for the library screen
    list: BookList,
    /// Image handles for books that have covers
    covers: HashMap<BookId, Handle>,
    screen: Screen,
    /// Edit mode on the library screen (delete and move controls)
    editing: bool,
    settings: Settings,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // ---- Library screen ----
    SortBy(SortStyle),
    ToggleEditing,
    Select(RowPath),
    Delete(RowPath),
    Move { from: RowPath, to: RowPath },

    // ---- Detail screen ----
    ToggleReadMe,
    ReviewEdited(text_editor::Action),
    PickCover,
    /// Decoded cover for the book that was open when the image was picked
    CoverLoaded(BookId, Result<Vec<u8>, String>),
    SaveChanges,
    /// Leave the detail or new-book screen without saving
    Back,

    // ---- New book screen ----
    NewTitleChanged(String),
    NewAuthorChanged(String),
    NewReadMeToggled(bool),
    CreateBook,
}

impl ReadMe {
    /// Create a new instance of the application around an opened store
    fn new(store: Store, settings: Settings) -> (Self, Task<Message>) {
        let mut app = ReadMe {
            store,
            list: BookList::new(settings.default_sort),
            covers: HashMap::new(),
            screen: Screen::Library,
            editing: false,
            settings,
            status: String::new(),
        };

        app.refresh_list(app.settings.default_sort);
        let count = app.list.listing().book_count();
        info!("📚 Read Me initialized with {} books", count);
        app.status = format!("Ready. {} books in library.", count);

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SortBy(style) => {
                self.refresh_list(style);
            }
            Message::ToggleEditing => {
                self.editing = !self.editing;
            }
            Message::Select(path) => match self.list.listing().row(path) {
                Some(Row::AddNew) => {
                    self.status.clear();
                    self.screen = Screen::NewBook(NewBookForm::default());
                }
                Some(Row::Book(book)) => {
                    // Open the stored copy, the listing may be older
                    match self.store.get(book.id()) {
                        Ok(Some(book)) => {
                            debug!("Opening {} \"{}\"", book.id(), book.title);
                            self.screen = Screen::Detail(DetailView::new(book));
                        }
                        Ok(None) => {
                            warn!("{} is gone from the store, refreshing", book.id());
                            self.refresh_list(self.list.sort_style());
                        }
                        Err(err) => self.report(err),
                    }
                }
                None => warn!("Nothing at {:?}, selection ignored", path),
            },
            Message::Delete(path) => {
                match self.list.delete(self.store.as_mut(), path) {
                    Ok(true) => self.status = "Book deleted.".to_string(),
                    Ok(false) => debug!("Nothing to delete at {:?}", path),
                    Err(err) => self.report(err),
                }
                self.rebuild_covers();
            }
            Message::Move { from, to } => {
                match self.list.move_row(self.store.as_mut(), from, to) {
                    Ok(refresh) => debug!("Reordered (animate: {})", refresh.animate),
                    Err(err) => self.report(err),
                }
            }

            Message::ToggleReadMe => {
                if let Screen::Detail(detail) = &mut self.screen {
                    detail.draft.toggle_read_me();
                }
            }
            Message::ReviewEdited(action) => {
                if let Screen::Detail(detail) = &mut self.screen {
                    detail.edit_review(action);
                }
            }
            Message::PickCover => {
                let Screen::Detail(detail) = &self.screen else {
                    return Task::none();
                };
                let id = detail.draft.book().id();

                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Choose a Cover Image")
                    .add_filter("Images", &cover::IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = picked {
                    return Task::perform(
                        cover::load_cover_async(path, self.settings.cover_size),
                        move |result| Message::CoverLoaded(id, result),
                    );
                }
            }
            Message::CoverLoaded(id, Ok(bytes)) => match &mut self.screen {
                Screen::Detail(detail) if detail.draft.book().id() == id => detail.set_cover(bytes),
                _ => debug!("Cover for {} arrived after its detail view closed, dropped", id),
            },
            Message::CoverLoaded(_, Err(err)) => self.report(err),
            Message::SaveChanges => {
                if let Screen::Detail(detail) = &mut self.screen {
                    if let Err(err) = detail.draft.commit(self.store.as_mut()) {
                        self.report(err);
                        return Task::none();
                    }
                    self.status = format!("Saved \"{}\".", detail.draft.book().title);
                }
                self.show_library();
            }
            Message::Back => {
                if let Screen::Detail(detail) = &mut self.screen {
                    detail.draft.discard();
                }
                self.show_library();
            }

            Message::NewTitleChanged(title) => {
                if let Screen::NewBook(form) = &mut self.screen {
                    form.title = title;
                }
            }
            Message::NewAuthorChanged(author) => {
                if let Screen::NewBook(form) = &mut self.screen {
                    form.author = author;
                }
            }
            Message::NewReadMeToggled(read_me) => {
                if let Screen::NewBook(form) = &mut self.screen {
                    form.read_me = read_me;
                }
            }
            Message::CreateBook => {
                if let Screen::NewBook(form) = &self.screen {
                    match self.store.insert(form.to_new_book()) {
                        Ok(book) => {
                            self.status = format!("Added \"{}\".", book.title);
                            self.show_library();
                        }
                        Err(err) => self.report(err),
                    }
                }
            }
        }

        Task::none()
    }

    /// Back to the list, regrouped with the current sort style
    fn show_library(&mut self) {
        self.screen = Screen::Library;
        self.refresh_list(self.list.sort_style());
    }

    fn refresh_list(&mut self, style: SortStyle) {
        match self.list.refresh(self.store.as_ref(), style) {
            Ok(_) => self.rebuild_covers(),
            Err(err) => self.report(err),
        }
    }

    /// Image handles for the listed covers. Handles whose bytes are
    /// unchanged are kept so iced doesn't upload them again.
    fn rebuild_covers(&mut self) {
        let mut previous = std::mem::take(&mut self.covers);
        self.covers = self
            .list
            .listing()
            .sections
            .iter()
            .flat_map(|section| section.rows.iter().filter_map(Row::book))
            .filter_map(|book| {
                let bytes = book.cover.as_ref()?;
                let handle = match previous.remove(&book.id()) {
                    Some(handle) if same_bytes(&handle, bytes) => handle,
                    _ => Handle::from_bytes(bytes.clone()),
                };
                Some((book.id(), handle))
            })
            .collect();
    }

    fn report(&mut self, err: impl Display) {
        error!("❌ {}", err);
        self.status = format!("⚠️  {}", err);
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Library => {
                ui::library_view::view(&self.list, &self.covers, self.editing, &self.status)
            }
            Screen::Detail(detail) => detail.view(),
            Screen::NewBook(form) => form.view(&self.status),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn same_bytes(handle: &Handle, bytes: &[u8]) -> bool {
    matches!(handle, Handle::Bytes(_, held) if &held[..] == bytes)
}

fn main() -> Result<(), AppError> {
    logging::init_tracing();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("⚠️  Could not load settings ({}), using defaults", err);
            Settings::default()
        }
    };

    let in_memory = std::env::args().skip(1).any(|arg| arg == "--memory");

    let mut store: Store = if in_memory {
        info!("🧪 Running on an in-memory library, nothing will be saved");
        Box::new(MemoryStore::new())
    } else {
        let library = Library::open(&settings.database_path()?)?;
        info!(
            "📖 Catalog at {} holds {} books",
            library.path().display(),
            library.book_count()?
        );
        Box::new(library)
    };

    if settings.seed_sample_books {
        seed_samples_if_empty(store.as_mut())?;
    }

    iced::application("Read Me", ReadMe::update, ReadMe::view)
        .theme(ReadMe::theme)
        .centered()
        .run_with(move || ReadMe::new(store, settings))?;

    Ok(())
}
