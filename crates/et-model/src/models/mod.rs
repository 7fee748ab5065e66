//! Built-in compartmental models.
//!
//! | Model     | Statuses              | Infected    | Uncounted | Requires                          |
//! |-----------|-----------------------|-------------|-----------|-----------------------------------|
//! | SEIR      | S E I R               | I E         | none      | workplace, education, religious   |
//! | SEIQRDV   | S E I Q R D V         | I E Q       | D         | healthcare_facility               |
//! | SEIsIrR   | S E Ir Is R           | S           | none      | none                              |

pub mod seiqrdv;
pub mod seir;
pub mod seisirr;
