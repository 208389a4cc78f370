use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Ledger API",
        version = "0.3.0",
        description = r#"
Transactional inventory ledger behind the storefront admin dashboard.

Orders are validated against live stock, amounts are derived from the
product's current price, and paid orders roll up into a monthly revenue
table - all inside one transaction per operation.

All endpoints require a bearer token; mutating endpoints require the
`admin` role.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::place_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::services::orders::PlaceOrderRequest,
        crate::services::orders::UpdateOrderRequest,
    )),
    tags(
        (name = "Orders", description = "Order ledger endpoints")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
