//! Outgoing response adjustments made by a controller.
//!
//! A controller returns a `ModelAndView`; anything it needs beyond the view
//! (a status override, extra headers) goes through this object.

#[derive(Debug, Clone, Default)]
pub struct WebResponse {
    status: Option<u16>,
    headers: Vec<(String, String)>,
}

impl WebResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
