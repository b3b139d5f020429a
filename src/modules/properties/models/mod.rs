mod property;

pub use property::{
    parse_import, MlsService, Property, PropertyChanges, PropertyDetail, PropertyInput,
    PropertyListQuery, PropertyRow, PropertyStatus, PropertyType, EXPORT_COLUMNS,
};
