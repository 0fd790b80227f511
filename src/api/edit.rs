use poem::{
    handler,
    web::{Html, Query},
};
use serde::Deserialize;

use super::templates;

#[derive(Deserialize, Debug)]
pub struct EditParams {
    #[serde(default)]
    pub id: String,
}

#[handler]
pub fn edit(Query(params): Query<EditParams>) -> Html<String> {
    templates::edit_page(&params.id)
}
