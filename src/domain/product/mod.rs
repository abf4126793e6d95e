pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{ClassicalFields, NewProduct, PriceEntry, Product, ProductContent, ProductUpdate, ProprietaryFields};
pub use repository::{ProductReadRepository, ProductWriteRepository};
pub use value_objects::{Category, DocumentId, ProductId};
