pub mod detail;
pub mod form;
pub mod list;
pub mod navigation;
pub mod session;

#[cfg(test)]
mod test_support;

pub use detail::DetailViewModel;
pub use form::{FormError, FormMode, MovieFormViewModel};
pub use list::{ListMode, ListViewModel, LoadState};
pub use navigation::Navigation;
pub use session::{GuestSessionProvider, SessionHolder, SessionProvider, CURRENT_USER_KEY};
