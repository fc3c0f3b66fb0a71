use serde::Serialize;

/// Body of `PUT /admin/themes/{component_id}/setting.json`.
#[derive(Debug, Serialize)]
pub struct ThemeSettingUpdate<'a> {
    pub name: &'a str,
    pub value: &'a str,
}
