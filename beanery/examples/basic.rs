//! Basic example of a Beanery application context.

use std::sync::Arc;

use beanery::{ApplicationContext, Result};

mod shop {
    use std::sync::Arc;

    use beanery::Injectable;
    use beanery::stereotype::{COMPONENT, REPOSITORY, SERVICE};

    // Untagged: only built because something depends on it.
    #[derive(Injectable)]
    pub struct Clock;

    impl Clock {
        pub fn now(&self) -> &'static str {
            "2024-01-01T00:00:00Z"
        }
    }

    #[derive(Injectable)]
    #[injectable(tags(COMPONENT))]
    pub struct ConsoleLogger;

    impl ConsoleLogger {
        pub fn log(&self, msg: &str) {
            println!("[LOG] {msg}");
        }
    }

    pub mod db {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(REPOSITORY))]
        pub struct OrderRepository {
            logger: Arc<ConsoleLogger>,
        }

        impl OrderRepository {
            pub fn find_order(&self, id: u64) -> String {
                self.logger.log(&format!("SELECT * FROM orders WHERE id = {id}"));
                format!("Order #{id}")
            }
        }
    }

    #[derive(Injectable)]
    #[injectable(tags(SERVICE))]
    pub struct OrderService {
        pub repo: Arc<db::OrderRepository>,
        pub logger: Arc<ConsoleLogger>,
        clock: Arc<Clock>,
    }

    impl OrderService {
        pub fn describe(&self, id: u64) -> String {
            self.logger.log(&format!("Describing order {id}"));
            format!("{} at {}", self.repo.find_order(id), self.clock.now())
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("beanery_container=debug")
        .init();

    let mut context = ApplicationContext::new(module_path!());
    let report = context.init()?;

    println!(
        "Discovered {} types, {} components, {} beans",
        report.discovered,
        report.components.len(),
        report.beans
    );
    println!("Beans: {:?}", context.bean_names());

    let service: Arc<shop::OrderService> = context.gen_bean("orderService")?;
    println!("{}", service.describe(42));

    let logger: Arc<shop::ConsoleLogger> = context.gen_bean("consoleLogger")?;
    println!(
        "Logger is a singleton: {}",
        Arc::ptr_eq(&service.logger, &logger)
    );

    if let Err(err) = context.gen_bean::<shop::Clock>("clok") {
        println!("\n{err}");
    }

    Ok(())
}
