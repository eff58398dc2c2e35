pub mod redirect;

pub use redirect::{PathMapper, RedirectService};
