/// Generates an `--id` delete command and its handler for an entity client.
macro_rules! define_delete_command {
    ($command:ident, $handler:ident, $id:ty, $accessor:ident, $label:literal) => {
        #[derive(Debug, clap::Args)]
        pub struct $command {
            #[arg(long)]
            pub id: i64,
        }

        pub async fn $handler(
            client: &$crate::infrastructure::client::BookReviewClient,
            command: $command,
        ) -> anyhow::Result<()> {
            client.$accessor().delete(<$id>::new(command.id)).await?;
            eprintln!(concat!("Deleted ", $label, " {}"), command.id);
            Ok(())
        }
    };
}

pub(crate) use define_delete_command;
