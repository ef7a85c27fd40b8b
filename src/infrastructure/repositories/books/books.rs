use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, query, query_as, query_scalar};

use crate::domain::RepositoryError;
use crate::domain::book_items::{Book, BookChanges, BookWithCreator, NewBook};
use crate::domain::ids::{BookId, UserId};
use crate::domain::listing::{Page, PageRequest};
use crate::domain::repositories::BookRepository;
use crate::domain::users::Creator;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::macros::push_update_field;

const BOOK_COLUMNS: &str = "b.id, b.title, b.author, b.description, b.genre, b.published_year, b.added_by, b.created_at, b.updated_at";

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_book(record: BookRecord) -> Book {
        Book {
            id: BookId::new(record.id),
            title: record.title,
            author: record.author,
            description: record.description,
            genre: record.genre,
            published_year: record.published_year,
            added_by: UserId::new(record.added_by),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn into_book_with_creator(record: BookWithCreatorRecord) -> BookWithCreator {
        let creator = Creator {
            id: UserId::new(record.added_by),
            name: record.creator_name,
            email: record.creator_email,
        };
        BookWithCreator {
            id: BookId::new(record.id),
            title: record.title,
            author: record.author,
            description: record.description,
            genre: record.genre,
            published_year: record.published_year,
            added_by: creator,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, new_book: NewBook) -> Result<Book, RepositoryError> {
        let now = Utc::now();

        let record = query_as::<_, BookRecord>(
            r"INSERT INTO books (title, author, description, genre, published_year, added_by, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              RETURNING id, title, author, description, genre, published_year, added_by, created_at, updated_at",
        )
        .bind(&new_book.title)
        .bind(&new_book.author)
        .bind(&new_book.description)
        .bind(&new_book.genre)
        .bind(new_book.published_year)
        .bind(i64::from(new_book.added_by))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        Ok(Self::into_book(record))
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b WHERE b.id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }

    async fn get_with_creator(&self, id: BookId) -> Result<BookWithCreator, RepositoryError> {
        let record = query_as::<_, BookWithCreatorRecord>(&format!(
            r"SELECT {BOOK_COLUMNS}, u.name AS creator_name, u.email AS creator_email
              FROM books b
              JOIN users u ON u.id = b.added_by
              WHERE b.id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book_with_creator(record))
    }

    async fn list(&self, request: PageRequest) -> Result<Page<BookWithCreator>, RepositoryError> {
        let total: i64 = query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let records = query_as::<_, BookWithCreatorRecord>(&format!(
            r"SELECT {BOOK_COLUMNS}, u.name AS creator_name, u.email AS creator_email
              FROM books b
              JOIN users u ON u.id = b.added_by
              ORDER BY b.id ASC
              LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(request.page_size()))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let items = records
            .into_iter()
            .map(Self::into_book_with_creator)
            .collect();

        Ok(Page::new(
            items,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn update(&self, id: BookId, changes: BookChanges) -> Result<Book, RepositoryError> {
        let mut builder = QueryBuilder::new("UPDATE books SET ");
        let mut sep = false;

        push_update_field!(builder, sep, "title", changes.title);
        push_update_field!(builder, sep, "author", changes.author);
        push_update_field!(builder, sep, "description", changes.description);
        push_update_field!(builder, sep, "genre", changes.genre);
        push_update_field!(builder, sep, "published_year", changes.published_year);
        push_update_field!(builder, sep, "updated_at", Some(Utc::now()));

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await
    }

    async fn delete_with_reviews(&self, id: BookId) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let reviews = query("DELETE FROM reviews WHERE book_id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        let book = query("DELETE FROM books WHERE id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        // Dropping the transaction rolls back the review deletion.
        if book.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(reviews.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    author: String,
    description: String,
    genre: String,
    published_year: i32,
    added_by: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BookWithCreatorRecord {
    id: i64,
    title: String,
    author: String,
    description: String,
    genre: String,
    published_year: i32,
    added_by: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    creator_name: String,
    creator_email: String,
}
