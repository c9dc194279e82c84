pub mod m202507010001_create_permissions;
pub mod m202507010002_create_factoids;
