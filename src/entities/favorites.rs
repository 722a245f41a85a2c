use sea_orm::entity::prelude::*;

/// Snapshot of a recommended country attached to the search that produced it.
///
/// The relation to `searches` exists for joins only; the table carries no
/// foreign key constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_name: String,
    pub capital: Option<String>,
    pub flag_url: Option<String>,
    pub weather_temp: Option<i32>,
    pub weather_desc: Option<String>,
    pub search_id: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::searches::Entity",
        from = "Column::SearchId",
        to = "super::searches::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Searches,
}

impl Related<super::searches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Searches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
