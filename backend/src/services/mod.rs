pub mod export_service;
pub mod spreadsheet;
pub mod youtube_client;

#[cfg(test)]
pub mod testing;
