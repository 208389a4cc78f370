use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240312_000004_create_revenue_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Revenue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Revenue::Month)
                            .string_len(7)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Revenue::Revenue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Revenue::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Revenue {
    Table,
    Month,
    Revenue,
}
