//! Redirect server.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! rapid-resolver serve
//!
//! # Bind to all interfaces with a custom browser URL
//! rapid-resolver serve --address 0.0.0.0 --ensembl-url https://beta.ensembl.org
//! ```
//!
//! ## Routes
//!
//! - `GET /` - Redirect to the genome browser home
//! - `GET /{species_url_name}/{subpath}` - Redirect to the genome's species page
//!   (the subpath, and the trailing slash, may be omitted)
//!
//! Failures are returned as JSON `{"detail": "..."}` with status 400 (no
//! accession in the URL), 404 (accession or genome unknown) or 500 (lookup
//! service failure).

pub mod server;
