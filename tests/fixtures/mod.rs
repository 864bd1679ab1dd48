pub mod crm;
pub mod identity;
