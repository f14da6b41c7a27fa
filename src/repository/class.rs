use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::class::{ClassRecord, ValidatedSchedule};
use crate::domain::types::ClassId;
use crate::models::class::{
    Class as DbClass, ClassMeeting as DbClassMeeting, NewClass as DbNewClass, NewClassMeeting,
};
use crate::repository::{
    ClassListQuery, ClassReader, ClassWriter, DieselRepository, RepositoryError,
    RepositoryResult,
};

/// Loads the meetings of `class` and assembles the domain record.
fn load_class(conn: &mut SqliteConnection, class: DbClass) -> RepositoryResult<ClassRecord> {
    use crate::schema::class_meetings;

    let meetings = DbClassMeeting::belonging_to(&class)
        .order((class_meetings::position.asc(), class_meetings::id.asc()))
        .load::<DbClassMeeting>(conn)?;

    Ok((class, meetings).try_into()?)
}

fn insert_meetings(
    conn: &mut SqliteConnection,
    class_id: i32,
    schedule: &ValidatedSchedule,
) -> RepositoryResult<usize> {
    use crate::schema::class_meetings;

    let rows = NewClassMeeting::for_class(class_id, &schedule.meetings);
    if rows.is_empty() {
        return Ok(0);
    }
    let affected = diesel::insert_into(class_meetings::table)
        .values(&rows)
        .execute(conn)?;
    Ok(affected)
}

impl ClassReader for DieselRepository {
    fn list_classes(&self, query: ClassListQuery) -> RepositoryResult<(usize, Vec<ClassRecord>)> {
        use crate::schema::{class_meetings, classes};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = classes::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(category) = query.category {
                items = items.filter(classes::category.eq(category.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((classes::created_at.desc(), classes::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
                .limit(i64::try_from(pagination.per_page).unwrap_or(i64::MAX));
        }
        let rows = items.load::<DbClass>(&mut conn)?;

        let meetings = DbClassMeeting::belonging_to(&rows)
            .order((class_meetings::position.asc(), class_meetings::id.asc()))
            .load::<DbClassMeeting>(&mut conn)?
            .grouped_by(&rows);

        let items = rows
            .into_iter()
            .zip(meetings)
            .map(TryInto::try_into)
            .collect::<Result<Vec<ClassRecord>, _>>()?;

        Ok((total, items))
    }

    fn get_class_by_id(&self, id: ClassId) -> RepositoryResult<Option<ClassRecord>> {
        use crate::schema::classes;

        let mut conn = self.conn()?;

        let class = classes::table
            .find(id.get())
            .first::<DbClass>(&mut conn)
            .optional()?;

        class.map(|class| load_class(&mut conn, class)).transpose()
    }
}

impl ClassWriter for DieselRepository {
    fn create_class(&self, schedule: &ValidatedSchedule) -> RepositoryResult<ClassRecord> {
        use crate::schema::classes;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let class = diesel::insert_into(classes::table)
                .values(&DbNewClass {
                    title: schedule.title.as_str(),
                    category: schedule.category.as_str(),
                    created_at: Utc::now().naive_utc(),
                })
                .get_result::<DbClass>(conn)?;

            insert_meetings(conn, class.id, schedule)?;
            load_class(conn, class)
        })
    }

    fn replace_class(
        &self,
        id: ClassId,
        schedule: &ValidatedSchedule,
    ) -> RepositoryResult<Option<ClassRecord>> {
        use crate::schema::{class_meetings, classes};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let class = diesel::update(classes::table.find(id.get()))
                .set((
                    classes::title.eq(schedule.title.as_str()),
                    classes::category.eq(schedule.category.as_str()),
                ))
                .get_result::<DbClass>(conn)
                .optional()?;

            let Some(class) = class else {
                return Ok(None);
            };

            diesel::delete(class_meetings::table.filter(class_meetings::class_id.eq(class.id)))
                .execute(conn)?;
            insert_meetings(conn, class.id, schedule)?;

            load_class(conn, class).map(Some)
        })
    }

    fn delete_class(&self, id: ClassId) -> RepositoryResult<usize> {
        use crate::schema::{class_meetings, classes, notes};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(notes::table.filter(notes::class_id.eq(id.get()))).execute(conn)?;
            diesel::delete(class_meetings::table.filter(class_meetings::class_id.eq(id.get())))
                .execute(conn)?;
            Ok(diesel::delete(classes::table.find(id.get())).execute(conn)?)
        })?;

        Ok(affected)
    }
}
