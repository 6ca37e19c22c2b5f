use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        invoice::{InvoiceDto, InvoiceMonthParams, InvoiceStatusParams, InvoiceYearParams},
    },
    server::{
        error::{error_response, invoice::InvoiceError, Error},
        model::app::AppState,
        service::invoice::InvoiceService,
        util::time::YearMonth,
    },
};

pub static INVOICE_TAG: &str = "invoice";

/// Multipart field carrying the uploaded invoice document
pub static PDF_FIELD: &str = "pdf";

/// Create the invoice of a month
///
/// Prices the billable sessions stored for the month and saves the result as a draft.
///
/// # Responses
/// - 201 (Created): The new invoice
/// - 400 (Bad Request): `year` or `month` is not a valid calendar month
/// - 409 (Conflict): The month is already invoiced
/// - 500 (Internal Server Error): A session has a project level without a rate
#[utoipa::path(
    post,
    path = "/invoices",
    tag = INVOICE_TAG,
    params(InvoiceMonthParams),
    responses(
        (status = 201, description = "Invoice created", body = InvoiceDto),
        (status = 400, description = "Invalid month", body = ErrorDto),
        (status = 409, description = "Invoice already exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_invoice(
    State(state): State<AppState>,
    Query(params): Query<InvoiceMonthParams>,
) -> Result<impl IntoResponse, Error> {
    let month = YearMonth::from_parts(&params.year, &params.month)?;

    let invoice = InvoiceService::new(&state.db).add(&month).await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Create the invoices of every month of a year
///
/// Months already invoiced are skipped. Fails with 409 when all twelve already exist.
#[utoipa::path(
    post,
    path = "/invoices/batch",
    tag = INVOICE_TAG,
    params(InvoiceYearParams),
    responses(
        (status = 201, description = "Invoices created", body = Vec<InvoiceDto>),
        (status = 400, description = "Invalid year", body = ErrorDto),
        (status = 409, description = "Invoice already exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_year_invoices(
    State(state): State<AppState>,
    Query(params): Query<InvoiceYearParams>,
) -> Result<impl IntoResponse, Error> {
    let year = params
        .year
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::ParseError(format!("Invalid invoice year {:?}", params.year)))?;

    let invoices = InvoiceService::new(&state.db).add_year(year).await?;

    if invoices.is_empty() {
        return Err(InvoiceError::AlreadyExists(year.to_string()).into());
    }

    Ok((StatusCode::CREATED, Json(invoices)))
}

/// List invoices, latest month first
#[utoipa::path(
    get,
    path = "/invoices",
    tag = INVOICE_TAG,
    responses(
        (status = 200, description = "Stored invoices", body = Vec<InvoiceDto>),
        (status = 404, description = "No invoice stored", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_invoices(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let invoices = InvoiceService::new(&state.db).list().await?;

    if invoices.is_empty() {
        return Ok(error_response(StatusCode::NOT_FOUND, "Invoice not found"));
    }

    Ok((StatusCode::OK, Json(invoices)).into_response())
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05")),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let invoice = InvoiceService::new(&state.db)
        .get(&id)
        .await?
        .ok_or(InvoiceError::NotFound(id))?;

    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05")),
    responses(
        (status = 200, description = "Invoice deleted", body = MessageDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    if InvoiceService::new(&state.db).remove(&id).await? == 0 {
        return Err(InvoiceError::NotFound(id).into());
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Invoice {} deleted", id),
        }),
    ))
}

/// Regenerate an invoice
///
/// Rebuilds the invoice from the sessions currently stored for its month. The status goes
/// back to `Draft` and any attached document is dropped.
#[utoipa::path(
    put,
    path = "/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05")),
    responses(
        (status = 201, description = "Invoice regenerated", body = InvoiceDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let invoice = InvoiceService::new(&state.db).refresh(&id).await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    put,
    path = "/invoices/{id}/status",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05"), InvoiceStatusParams),
    responses(
        (status = 201, description = "Status updated", body = InvoiceDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_invoice_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<InvoiceStatusParams>,
) -> Result<impl IntoResponse, Error> {
    let invoice = InvoiceService::new(&state.db)
        .set_status(&id, params.status)
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Attach a document to an invoice
///
/// Expects a multipart body with the file in the `pdf` field. Replaces any previous document.
#[utoipa::path(
    put,
    path = "/invoices/{id}/pdf",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05")),
    request_body(content_type = "multipart/form-data", description = "Document in the `pdf` field"),
    responses(
        (status = 201, description = "Document attached", body = InvoiceDto),
        (status = 400, description = "No `pdf` field in the upload", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_invoice_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.pdf", id));
        let file = field.bytes().await?.to_vec();

        let invoice = InvoiceService::new(&state.db)
            .attach_file(&id, filename, file)
            .await?;

        return Ok((StatusCode::CREATED, Json(invoice)));
    }

    Err(Error::ParseError(format!(
        "Upload is missing the {:?} field",
        PDF_FIELD
    )))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}/pdf",
    tag = INVOICE_TAG,
    params(("id" = String, Path, description = "Invoice id, e.g. OC-2021-05")),
    responses(
        (status = 200, description = "Attached document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Invoice or document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_invoice_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let (filename, file) = InvoiceService::new(&state.db).file(&id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename.replace('"', "")),
            ),
        ],
        file,
    ))
}
