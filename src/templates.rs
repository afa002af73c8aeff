use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use log::error;
use tera::{Context, Tera};

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn load(glob: &str) -> tera::Result<Templates> {
        Ok(Templates {
            tera: Tera::new(glob)?,
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> Response {
        match self.tera.render(name, context) {
            Ok(rendered) => Html(rendered).into_response(),
            Err(err) => {
                error!("Failed to render {}: {:?}", name, err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }

    /// Render one of the form pages with a message above the form.
    pub fn form(&self, name: &str, message: &str) -> Response {
        let mut context = Context::new();
        context.insert("message", message);
        self.render(name, &context)
    }
}
