use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Direction for one admin sort key. `Unspecified` leaves the key out of the ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unspecified,
}

impl From<Option<bool>> for SortDirection {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => SortDirection::Ascending,
            Some(false) => SortDirection::Descending,
            None => SortDirection::Unspecified,
        }
    }
}

/// Admin listing sort. Keys apply in a fixed precedence: name, then code,
/// then serial number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSort {
    pub name: SortDirection,
    pub code: SortDirection,
    pub serial_number: SortDirection,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HomeQuery {
    /// Case-insensitive text matched against name and description.
    pub busca: Option<String>,
    pub marca: Option<String>,
    pub categoria: Option<String>,
    /// `true` sorts by price ascending, anything else descending.
    #[serde(default)]
    pub ordenacao: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListingQuery {
    pub busca: Option<String>,
    #[serde(rename = "ordNomeE")]
    pub ord_nome: Option<bool>,
    #[serde(rename = "ordCodClass")]
    pub ord_cod_class: Option<bool>,
    #[serde(rename = "ordNumSerie")]
    pub ord_num_serie: Option<bool>,
}

impl AdminListingQuery {
    pub fn sort(&self) -> AdminSort {
        AdminSort {
            name: self.ord_nome.into(),
            code: self.ord_cod_class.into(),
            serial_number: self.ord_num_serie.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_flags_map_to_directions() {
        let query = AdminListingQuery {
            busca: None,
            ord_nome: Some(true),
            ord_cod_class: None,
            ord_num_serie: Some(false),
        };
        let sort = query.sort();
        assert_eq!(sort.name, SortDirection::Ascending);
        assert_eq!(sort.code, SortDirection::Unspecified);
        assert_eq!(sort.serial_number, SortDirection::Descending);
    }

    #[test]
    fn admin_query_reads_portuguese_parameter_names() {
        let query: AdminListingQuery =
            serde_json::from_str(r#"{"busca":"dell","ordCodClass":false}"#).unwrap();
        assert_eq!(query.busca.as_deref(), Some("dell"));
        assert_eq!(query.ord_cod_class, Some(false));
        assert_eq!(query.ord_nome, None);
    }

    #[test]
    fn home_query_defaults_to_descending() {
        let query: HomeQuery = serde_json::from_str(r#"{"marca":"dell"}"#).unwrap();
        assert!(!query.ordenacao);
        assert_eq!(query.marca.as_deref(), Some("dell"));
    }
}
