/// Service layer
///
/// Services compose model calls behind the authorization checks. Each holds a
/// clone of the connection pool and is cheap to clone itself. Every protected
/// operation takes the caller's user id as an explicit argument.
///
/// # Example
///
/// ```no_run
/// use kanban_shared::services::{BoardService, UserDirectory};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let users = UserDirectory::new(pool.clone());
/// let boards = BoardService::new(pool);
///
/// let alice = users.register("alice@example.com", "secret1").await?;
/// let board = boards.create_board(alice.id, "Sprint").await?;
/// let detail = boards.get_board_detail(board.id, alice.id).await?;
/// assert_eq!(detail.lists.len(), 4);
/// # Ok(())
/// # }
/// ```

pub mod boards;
pub mod cards;
pub mod directory;
pub mod lists;

pub use boards::BoardService;
pub use cards::CardService;
pub use directory::UserDirectory;
pub use lists::ListService;
