mod distribute;
mod partition;
