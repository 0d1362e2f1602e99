//! HTTP entry point for the calculator, packaged as a Lambda function
//!
//! POST a raw form payload (all numeric fields as strings, as the calculator
//! form submits them) and receive the full comparison result as JSON.
//! Sanitization never fails; a non-positive primary income surfaces as 400.

use kokuho_compare::household::RawHouseholdForm;
use kokuho_compare::{calculate, CalcError, CalcPolicy, RateTable};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{error, info};

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let form: RawHouseholdForm = match serde_json::from_slice(event.body().as_ref()) {
        Ok(form) => form,
        Err(e) => {
            return json_response(400, &serde_json::json!({ "error": format!("invalid request body: {}", e) }));
        }
    };

    let input = form.sanitize();
    info!(
        "request: {} member(s), income {} yen",
        input.member_count(),
        input.primary.annual_income_yen
    );

    match calculate(&input, &RateTable::default(), &CalcPolicy::default()) {
        Ok(result) => json_response(200, &result),
        Err(e @ CalcError::InvalidInput(_)) => {
            json_response(400, &serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            error!("calculation failed: {}", e);
            json_response(500, &serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn json_response<T: serde::Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body)?))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
