pub mod csv_response;
