use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

/// Security scheme modifier to add the bearer session token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Session token from /auth/login or /auth/signup"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookstall API",
        version = "0.1.0",
        description = "School-bookshop point-of-sale API: textbook catalog, student directory, sale ledger with atomic stock adjustment, supplier debts and reporting.\n\n## Authentication\n\nAll endpoints except `/auth/*` and `/health*` require `Authorization: Bearer <token>`; tokens come from `/auth/login` or `/auth/signup` and expire after 24 hours.",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sign-up and login"),
        (name = "books", description = "Textbook catalog"),
        (name = "students", description = "Student directory and purchase summaries"),
        (name = "sales", description = "Sale transactions and reporting"),
        (name = "suppliers", description = "Supplier debts and payments"),
        (name = "settings", description = "Shop settings")
    ),
    paths(
        // Health routes
        crate::routes::health::health,
        crate::routes::health::db_health,
        // Auth routes
        crate::routes::auth::login,
        crate::routes::auth::signup,
        // Book routes
        crate::routes::book::get_books::get_books,
        crate::routes::book::create_book::create_book,
        crate::routes::book::update_stock::update_stock,
        crate::routes::book::update_price::update_price,
        crate::routes::book::delete_book::delete_book,
        crate::routes::book::low_stock::low_stock,
        // Student routes
        crate::routes::student::get_students::get_students,
        crate::routes::student::create_student::create_student,
        crate::routes::student::update_student::update_student,
        crate::routes::student::summaries::get_summaries,
        // Sale routes
        crate::routes::sale::create_sale::create_sale,
        crate::routes::sale::report::get_report,
        crate::routes::sale::recent::get_recent,
        crate::routes::sale::totals::get_totals,
        // Supplier routes
        crate::routes::supplier::get_suppliers::get_suppliers,
        crate::routes::supplier::create_supplier::create_supplier,
        crate::routes::supplier::add_payment::add_payment,
        // Settings routes
        crate::routes::setting::get_settings::get_settings,
        crate::routes::setting::update_settings::update_settings,
    ),
    components(schemas(
        // Health schemas
        crate::routes::health::HealthResponse,
        crate::routes::health::DbHealthResponse,
        // Auth schemas
        crate::routes::auth::LoginRequest,
        crate::routes::auth::SignupRequest,
        crate::routes::auth::UserInfo,
        crate::routes::auth::TokenResponse,
        // Book schemas
        crate::routes::book::create_book::CreateBookRequest,
        crate::routes::book::update_stock::UpdateStockRequest,
        crate::routes::book::update_price::UpdatePriceRequest,
        crate::routes::book::delete_book::DeleteBookResponse,
        crate::routes::book::low_stock::LowStockResponse,
        // Student schemas
        crate::routes::student::create_student::CreateStudentRequest,
        crate::routes::student::update_student::UpdateStudentRequest,
        crate::routes::student::summaries::StudentSummary,
        // Sale schemas
        crate::routes::sale::create_sale::CartItem,
        crate::routes::sale::create_sale::CreateSaleRequest,
        crate::routes::sale::report::ReportQuery,
        crate::routes::sale::report::PopulatedSaleItem,
        crate::routes::sale::report::PopulatedSale,
        crate::routes::sale::recent::RecentQuery,
        crate::routes::sale::totals::TotalsResponse,
        // Supplier schemas
        crate::routes::supplier::get_suppliers::SupplierWithPayments,
        crate::routes::supplier::create_supplier::CreateSupplierRequest,
        crate::routes::supplier::add_payment::AddPaymentRequest,
        // Settings schemas
        crate::routes::setting::update_settings::UpdateSettingsRequest,
    ))
)]
pub struct ApiDoc;
