use milp_solve_sdk::{Operator, ProblemBuilder, SolveStatus, SolverClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a client (adjust URL as needed)
    let client = SolverClient::new("http://127.0.0.1:9000")?;

    match client.health_check().await {
        Ok(true) => println!("Server is healthy"),
        Ok(false) => println!("Server returned non-success status"),
        Err(e) => println!("Health check failed: {}", e),
    }

    // Pick at most one of each pair, maximize x1 + 2*x2 + x3:
    //   x1 + x2 <= 1
    //   x1 + x3 <= 1
    //   x2 + x3 <= 1
    let request = ProblemBuilder::new()
        .bool_var("x1")
        .bool_var("x2")
        .bool_var("x3")
        .constraint("x1_x2", [("x1", 1), ("x2", 1)], Operator::Le, 1)
        .constraint("x1_x3", [("x1", 1), ("x3", 1)], Operator::Le, 1)
        .constraint("x2_x3", [("x2", 1), ("x3", 1)], Operator::Le, 1)
        .maximize([("x1", 1), ("x2", 2), ("x3", 1)])
        .time_limit(10.0)
        .build()?;

    let result = client.solve(&request).await?;

    println!("Status: {:?}", result.status);
    println!("Added constraints: {:?}", result.added_constraints);
    match result.status {
        SolveStatus::Optimal | SolveStatus::Feasible => {
            if let Some(objective) = result.objective_value {
                println!("Objective value: {}", objective);
            }
            for (var, value) in result.values.iter().flatten() {
                println!("  {} = {}", var, value);
            }
        }
        SolveStatus::ModelInvalid => {
            println!("Model invalid: {}", result.error.unwrap_or_default());
        }
        _ => {
            if let Some(info) = result.solution_info {
                println!("Solver info: {}", info);
            }
        }
    }

    Ok(())
}
