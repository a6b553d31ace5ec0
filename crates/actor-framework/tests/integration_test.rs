use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    table: u32,
    bumped: bool,
    station: String,
}

#[derive(Debug)]
struct TicketCreate {
    table: u32,
}

#[derive(Debug)]
struct TicketUpdate {
    table: Option<u32>,
}

#[derive(Debug)]
enum TicketAction {
    Bump,
}

#[derive(Debug, thiserror::Error)]
enum TicketError {
    #[error("table {0} does not exist")]
    NoSuchTable(u32),
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = String;
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate, station: &String) -> Result<Self, Self::Error> {
        if params.table == 0 {
            return Err(TicketError::NoSuchTable(0));
        }
        Ok(Self {
            id,
            table: params.table,
            bumped: false,
            station: station.clone(),
        })
    }

    async fn on_update(&mut self, update: TicketUpdate, _ctx: &String) -> Result<(), Self::Error> {
        if let Some(table) = update.table {
            if table == 0 {
                return Err(TicketError::NoSuchTable(table));
            }
            self.table = table;
        }
        Ok(())
    }

    // Bumping twice is a no-op that reports `false`.
    async fn handle_action(&mut self, action: TicketAction, _ctx: &String) -> Result<bool, Self::Error> {
        match action {
            TicketAction::Bump => {
                if self.bumped {
                    Ok(false)
                } else {
                    self.bumped = true;
                    Ok(true)
                }
            }
        }
    }
}

// --- Test ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    let handle = tokio::spawn(actor.run("grill".to_string()));

    // 1. Create, with context available during construction
    let id: u32 = client.create(TicketCreate { table: 4 }).await.unwrap();
    assert_eq!(id, 1);
    let ticket: Ticket = client.get(id).await.unwrap().unwrap();
    assert_eq!(ticket.station, "grill");

    // 2. Idempotent action
    assert!(client.perform_action(id, TicketAction::Bump).await.unwrap());
    assert!(!client.perform_action(id, TicketAction::Bump).await.unwrap());

    // 3. Update
    let updated = client.update(id, TicketUpdate { table: Some(7) }).await.unwrap();
    assert_eq!(updated.table, 7);
    assert!(updated.bumped);

    // 4. List
    client.create(TicketCreate { table: 2 }).await.unwrap();
    let mut tables: Vec<u32> = client.list().await.unwrap().iter().map(|t| t.table).collect();
    tables.sort();
    assert_eq!(tables, vec![2, 7]);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_framework_errors() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run("fryer".to_string()));

    let err = client.create(TicketCreate { table: 0 }).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert!(client.list().await.unwrap().is_empty());

    let err = client.perform_action(42, TicketAction::Bump).await.unwrap_err();
    assert!(err.is_not_found());

    let id = client.create(TicketCreate { table: 1 }).await.unwrap();
    let err = client.update(id, TicketUpdate { table: Some(0) }).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert_eq!(client.get(id).await.unwrap().unwrap().table, 1);
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Ticket>::new(1);
    drop(actor);
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
