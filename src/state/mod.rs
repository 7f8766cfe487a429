mod persistence;

pub use persistence::{
    storage_key,
    ArtworkShelf,
    StorageError,
    StorageResult,
};
