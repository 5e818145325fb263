/// Virtual try-on modal state; lives for one open/close cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryOnState {
    pub is_open: bool,
    pub image_url: Option<String>,
    pub product_name: Option<String>,
    pub user_photo: Option<String>,
    pub result_image: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TryOnState {
    pub fn open(image_url: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            is_open: true,
            image_url: Some(image_url.into()),
            product_name: Some(product_name.into()),
            ..Self::default()
        }
    }

    /// New photo invalidates any previous result or error.
    pub fn set_photo(&mut self, data_url: impl Into<String>) {
        self.user_photo = Some(data_url.into());
        self.result_image = None;
        self.error = None;
    }

    /// Back to the upload step for the same product.
    pub fn reset(&mut self) {
        self.user_photo = None;
        self.result_image = None;
        self.error = None;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}
