use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use mentor_billing::{
    model::invoice::{
        InvoiceDto, InvoiceMonthParams, InvoiceStatus, InvoiceStatusParams, InvoiceYearParams,
    },
    server::{
        controller::invoice::{
            add_invoice, add_year_invoices, delete_invoice, download_invoice_pdf, get_invoice,
            list_invoices, refresh_invoice, set_invoice_status,
        },
        model::app::AppState,
        service::invoice::InvoiceService,
    },
};

use super::*;

fn month(year: &str, month: &str) -> Query<InvoiceMonthParams> {
    Query(InvoiceMonthParams {
        year: year.to_string(),
        month: month.to_string(),
    })
}

/// Billing tables with two self-funded level 3 sessions and one third-party level 1 session
/// in May 2021.
async fn may_2021() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_billing_tables()
        .with_student(1, SELF_FUNDED)
        .with_student(2, THIRD_PARTY_FUNDED)
        .with_session(factory::mock_session_with(
            1,
            1,
            factory::date(2021, 5, 3, 10),
            "3",
            "mentoring",
            "completed",
        ))
        .with_session(factory::mock_session_with(
            2,
            1,
            factory::date(2021, 5, 10, 10),
            "3",
            "mentoring",
            "completed",
        ))
        .with_session(factory::mock_session_with(
            3,
            2,
            factory::date(2021, 5, 12, 10),
            "1",
            "mentoring",
            "completed",
        ))
        .build()
        .await
}

/// Expect 201 Created with the priced month, then 409 Conflict on a second add
#[tokio::test]
async fn add_prices_month_once() -> Result<(), TestError> {
    let test = may_2021().await?;
    let state: AppState = test.to_app_state();

    let result = add_invoice(State(state.clone()), month("2021", "05")).await;
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invoice: InvoiceDto = body_json(resp).await;
    assert_eq!(invoice.id, "OC-2021-05");
    assert_eq!(invoice.total, 100.0);

    let again = add_invoice(State(state), month("2021", "5")).await;
    assert_eq!(
        again.err().unwrap().into_response().status(),
        StatusCode::CONFLICT
    );

    Ok(())
}

/// Expect 400 Bad Request for a month outside 1 to 12
#[tokio::test]
async fn add_rejects_invalid_month() -> Result<(), TestError> {
    let test = TestBuilder::new().with_billing_tables().build().await?;

    let result = add_invoice(State(test.to_app_state()), month("2021", "13")).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}

/// Expect the missing months of the year, and 409 Conflict once all twelve exist
#[tokio::test]
async fn batch_adds_missing_months() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_invoice("2021-01")
        .with_invoice("2021-02")
        .build()
        .await?;
    let state: AppState = test.to_app_state();
    let year = || {
        Query(InvoiceYearParams {
            year: "2021".to_string(),
        })
    };

    let result = add_year_invoices(State(state.clone()), year()).await;
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invoices: Vec<InvoiceDto> = body_json(resp).await;
    assert_eq!(invoices.len(), 10);
    assert_eq!(invoices[0].date, "2021-03");

    let again = add_year_invoices(State(state), year()).await;
    assert_eq!(
        again.err().unwrap().into_response().status(),
        StatusCode::CONFLICT
    );

    Ok(())
}

/// Expect 404 Not Found for an empty listing, latest month first otherwise
#[tokio::test]
async fn list_orders_by_month() -> Result<(), TestError> {
    let empty = TestBuilder::new().with_billing_tables().build().await?;
    let result = list_invoices(State(empty.to_app_state())).await;
    assert_eq!(result.unwrap().into_response().status(), StatusCode::NOT_FOUND);

    let test = TestBuilder::new()
        .with_billing_tables()
        .with_invoice("2021-04")
        .with_invoice("2021-06")
        .build()
        .await?;
    let result = list_invoices(State(test.to_app_state())).await;
    let invoices: Vec<InvoiceDto> = body_json(result.unwrap().into_response()).await;

    assert_eq!(invoices[0].id, "OC-2021-06");
    assert_eq!(invoices[1].id, "OC-2021-04");

    Ok(())
}

/// Expect 404 Not Found once an invoice has been deleted
#[tokio::test]
async fn delete_then_get_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_invoice("2021-04")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let deleted = delete_invoice(State(state.clone()), Path("OC-2021-04".to_string())).await;
    assert_eq!(deleted.unwrap().into_response().status(), StatusCode::OK);

    let found = get_invoice(State(state.clone()), Path("OC-2021-04".to_string())).await;
    assert_eq!(
        found.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    let deleted_again = delete_invoice(State(state), Path("OC-2021-04".to_string())).await;
    assert_eq!(
        deleted_again.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect refresh to pick up new sessions and reset the status to Draft
#[tokio::test]
async fn refresh_rebuilds_invoice() -> Result<(), TestError> {
    let test = may_2021().await?;
    let state: AppState = test.to_app_state();

    add_invoice(State(state.clone()), month("2021", "05"))
        .await
        .unwrap();
    set_invoice_status(
        State(state.clone()),
        Path("OC-2021-05".to_string()),
        Query(InvoiceStatusParams {
            status: InvoiceStatus::Sent,
        }),
    )
    .await
    .unwrap();

    let result = refresh_invoice(State(state), Path("OC-2021-05".to_string())).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invoice: InvoiceDto = body_json(resp).await;
    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.total, 100.0);

    Ok(())
}

/// Expect 404 Not Found when refreshing an unknown invoice
#[tokio::test]
async fn refresh_unknown_invoice_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_billing_tables().build().await?;

    let result = refresh_invoice(State(test.to_app_state()), Path("OC-2030-01".to_string())).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect the status to change while the items stay untouched
#[tokio::test]
async fn status_update_keeps_items() -> Result<(), TestError> {
    let test = may_2021().await?;
    let state: AppState = test.to_app_state();
    add_invoice(State(state.clone()), month("2021", "05"))
        .await
        .unwrap();

    let result = set_invoice_status(
        State(state),
        Path("OC-2021-05".to_string()),
        Query(InvoiceStatusParams {
            status: InvoiceStatus::Payed,
        }),
    )
    .await;

    let invoice: InvoiceDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(invoice.status, InvoiceStatus::Payed);
    assert_eq!(invoice.item.len(), 3);

    Ok(())
}

/// Expect the attached document with its filename, 404 Not Found before one is attached
#[tokio::test]
async fn download_returns_attached_document() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_invoice("2021-04")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let before = download_invoice_pdf(State(state.clone()), Path("OC-2021-04".to_string())).await;
    assert_eq!(
        before.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    InvoiceService::new(&state.db)
        .attach_file("OC-2021-04", "april.pdf".to_string(), b"%PDF-1.4".to_vec())
        .await
        .unwrap();

    let after = download_invoice_pdf(State(state), Path("OC-2021-04".to_string())).await;
    let resp = after.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"april.pdf\""
    );
    assert_eq!(crate::util::body_bytes(resp).await, b"%PDF-1.4".to_vec());

    Ok(())
}
