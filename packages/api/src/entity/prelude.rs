pub use super::book::Entity as Book;
pub use super::error_report::Entity as ErrorReport;
pub use super::sale::Entity as Sale;
pub use super::sale_item::Entity as SaleItem;
pub use super::setting::Entity as Setting;
pub use super::student::Entity as Student;
pub use super::supplier::Entity as Supplier;
pub use super::supplier_payment::Entity as SupplierPayment;
pub use super::user::Entity as User;
