use crate::api::form::render_form;
use crate::models::ExportRequest;
use crate::services::export_service;
use crate::AppState;
use log::{error, info};
use rocket::form::Form;
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::content::RawHtml;
use rocket::response::{self, Responder};
use rocket::{get, post, Response, State};
use std::io::Cursor;
use std::path::Path;

pub const NOT_FOUND_MESSAGE: &str = "Channel not found or an error occurred.";

/// A finished workbook sent as a file attachment.
pub struct SpreadsheetDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetDownload {
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("export.xlsx")
            .to_string();
        Ok(Self { file_name, bytes })
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for SpreadsheetDownload {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'o> {
        Response::build()
            .header(ContentType::new(
                "application",
                "vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ))
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.file_name),
            )
            .sized_body(self.bytes.len(), Cursor::new(self.bytes))
            .ok()
    }
}

#[derive(rocket::Responder)]
pub enum ExportResponse {
    Form(RawHtml<String>),
    Download(SpreadsheetDownload),
}

#[get("/")]
pub fn index() -> RawHtml<String> {
    render_form(None)
}

#[post("/", data = "<request>")]
pub async fn submit(
    request: Form<ExportRequest>,
    state: &State<AppState>,
) -> Result<ExportResponse, Status> {
    let channel_name = request.channel_name.trim();
    if channel_name.is_empty() {
        return Ok(ExportResponse::Form(render_form(Some(NOT_FOUND_MESSAGE))));
    }

    info!("Export requested for channel '{channel_name}'");
    match export_service::export_channel(&state.client, &state.output_dir, channel_name).await {
        Ok(Some(path)) => match SpreadsheetDownload::from_path(&path).await {
            Ok(download) => Ok(ExportResponse::Download(download)),
            Err(e) => {
                error!("Failed to read export {}: {e:?}", path.display());
                Err(Status::InternalServerError)
            }
        },
        Ok(None) => Ok(ExportResponse::Form(render_form(Some(NOT_FOUND_MESSAGE)))),
        Err(e) => {
            error!("Export for channel '{channel_name}' failed: {e:?}");
            Err(Status::InternalServerError)
        }
    }
}
