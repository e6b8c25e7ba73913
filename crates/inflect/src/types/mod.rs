mod entry;
mod keyed;
mod value;

pub use entry::Entry;
pub use keyed::KeyedInflection;
pub use value::{InflectionArgs, TokenFn, Value};
